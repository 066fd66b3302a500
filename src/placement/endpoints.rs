use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, put, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::form::CampaignDraft;

use super::{manager, Placement, PlacementId, PlacementStatus};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlacementBody {
    pub id: PlacementId,
    pub tracking_code: String,
    pub tracking_url: String,
    pub status: PlacementStatus,
    #[serde(flatten)]
    pub draft: CampaignDraft,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl PlacementBody {
    pub fn render(placement: Placement) -> PlacementBody {
        PlacementBody {
            id: placement.id,
            tracking_code: placement.tracking_code,
            tracking_url: placement.tracking_url,
            status: placement.status,
            draft: placement.draft,
            created_at: placement.created_at,
            modified_at: placement.modified_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: PlacementStatus,
}

#[post("/api/placements")]
#[tracing::instrument(skip(db))]
pub async fn create_placement(
    db: Data<Box<dyn Database>>,
    body: Json<CampaignDraft>,
) -> Result<HttpResponse, Error> {
    let draft = manager::validate_draft(&body.into_inner())?;

    let placement = manager::create_placement(&***db, draft).await?;

    Ok(HttpResponse::Created().json(PlacementBody::render(placement)))
}

#[get("/api/placements")]
#[tracing::instrument(skip(db))]
pub async fn get_placements(
    db: Data<Box<dyn Database>>,
) -> Result<Json<Vec<PlacementBody>>, Error> {
    let placements = manager::get_placements(&***db).await?;

    let body = placements.into_iter().map(PlacementBody::render).collect();

    Ok(Json(body))
}

#[get("/api/placements/by-code/{tracking_code}")]
#[tracing::instrument(skip(db))]
pub async fn get_placement_by_tracking_code(
    db: Data<Box<dyn Database>>,
    params: Path<String>,
) -> Result<Json<PlacementBody>, Error> {
    let tracking_code = params.into_inner();

    let placement = manager::get_placement_by_tracking_code(&***db, &tracking_code).await?;

    Ok(Json(PlacementBody::render(placement)))
}

#[get("/api/placements/{placement_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_placement_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<PlacementId>,
) -> Result<Json<PlacementBody>, Error> {
    let placement_id = params.into_inner();

    let placement = manager::get_placement_by_id(&***db, placement_id).await?;

    Ok(Json(PlacementBody::render(placement)))
}

#[put("/api/placements/{placement_id}/status")]
#[tracing::instrument(skip(db))]
pub async fn update_placement_status(
    db: Data<Box<dyn Database>>,
    params: Path<PlacementId>,
    body: Json<StatusBody>,
) -> Result<Json<PlacementBody>, Error> {
    let placement_id = params.into_inner();
    let body = body.into_inner();

    let placement = manager::update_placement_status(&***db, placement_id, body.status).await?;

    Ok(Json(PlacementBody::render(placement)))
}
