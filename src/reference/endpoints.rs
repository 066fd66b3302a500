use actix_web::web::{self, Data, Json, Path};
use actix_web::{delete, get, post, put, HttpResponse, Scope};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::utils::SuccessBody;

use super::{manager, ReferenceEntity, ReferenceId, ReferenceKind};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NameBody {
    #[serde(default)]
    pub name: Option<String>,
}

impl NameBody {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferenceBody {
    pub id: ReferenceId,
    pub name: String,
}

impl ReferenceBody {
    pub fn render(reference: ReferenceEntity) -> ReferenceBody {
        ReferenceBody {
            id: reference.id,
            name: reference.name,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExistsBody {
    pub exists: bool,
}

/// Mounts the reference endpoints for one kind under its path.
pub fn scope(kind: ReferenceKind) -> Scope {
    web::scope(kind.path())
        .app_data(Data::new(kind))
        .service(get_references)
        .service(create_reference)
        .service(check_reference)
        .service(get_reference_by_id)
        .service(rename_reference)
        .service(delete_reference)
}

#[get("")]
#[tracing::instrument(skip(db))]
pub async fn get_references(
    db: Data<Box<dyn Database>>,
    kind: Data<ReferenceKind>,
) -> Result<Json<Vec<ReferenceBody>>, Error> {
    let references = manager::get_references(&***db, **kind).await?;

    let body = references.into_iter().map(ReferenceBody::render).collect();

    Ok(Json(body))
}

#[post("")]
#[tracing::instrument(skip(db))]
pub async fn create_reference(
    db: Data<Box<dyn Database>>,
    kind: Data<ReferenceKind>,
    body: Json<NameBody>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();

    let reference = manager::create_reference(&***db, **kind, body.name()).await?;

    Ok(HttpResponse::Created().json(ReferenceBody::render(reference)))
}

#[post("/check")]
#[tracing::instrument(skip(db))]
pub async fn check_reference(
    db: Data<Box<dyn Database>>,
    kind: Data<ReferenceKind>,
    body: Json<NameBody>,
) -> Result<Json<ExistsBody>, Error> {
    let body = body.into_inner();

    let exists = manager::reference_exists(&***db, **kind, body.name()).await?;

    Ok(Json(ExistsBody { exists }))
}

#[get("/{reference_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_reference_by_id(
    db: Data<Box<dyn Database>>,
    kind: Data<ReferenceKind>,
    params: Path<ReferenceId>,
) -> Result<Json<ReferenceBody>, Error> {
    let reference_id = params.into_inner();

    let reference = manager::get_reference_by_id(&***db, **kind, reference_id).await?;

    Ok(Json(ReferenceBody::render(reference)))
}

#[put("/{reference_id}")]
#[tracing::instrument(skip(db))]
pub async fn rename_reference(
    db: Data<Box<dyn Database>>,
    kind: Data<ReferenceKind>,
    params: Path<ReferenceId>,
    body: Json<NameBody>,
) -> Result<Json<ReferenceBody>, Error> {
    let reference_id = params.into_inner();
    let body = body.into_inner();

    let reference = manager::rename_reference(&***db, **kind, reference_id, body.name()).await?;

    Ok(Json(ReferenceBody::render(reference)))
}

#[delete("/{reference_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_reference(
    db: Data<Box<dyn Database>>,
    kind: Data<ReferenceKind>,
    params: Path<ReferenceId>,
) -> Result<Json<SuccessBody>, Error> {
    let reference_id = params.into_inner();

    manager::delete_reference(&***db, **kind, reference_id).await?;

    Ok(Json(SuccessBody::new()))
}
