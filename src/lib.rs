use actix_web::web::{self, Data, JsonConfig, PathConfig, QueryConfig, ServiceConfig};
use actix_web::{App, HttpServer, ResponseError};
use mongodb::Client;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod config;
pub mod database;
pub mod error;
pub mod form;
pub mod hierarchy;
pub mod placement;
pub mod reference;
pub mod resolver;
pub mod seed;
pub mod typedid;
pub mod utils;

pub use config::{Config, StoreBackend};
pub use database::{Database, MemoryDatabase, MongoDatabase};
pub use error::Error;
pub use form::{CampaignDraft, ValidationReportBody};
pub use placement::{PlacementBody, StatusBody};
pub use reference::{ExistsBody, NameBody, ReferenceBody, ReferenceKind};

/// Registers every route along with the extractor error handlers. Expects
/// a `Data<Box<dyn Database>>` to be provided by the app.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .app_data(QueryConfig::default().error_handler(|err, _req| {
        // format query errors with custom format
        Error::InvalidQuery(err).into()
    }))
    .service(form::get_campaign_types)
    .service(form::get_sources)
    .service(form::get_ad_types)
    .service(form::get_ad_type_details)
    .service(form::get_cost_centers)
    .service(form::get_sub_ledgers)
    .service(form::validate_draft)
    .service(placement::create_placement)
    .service(placement::get_placements)
    .service(placement::get_placement_by_tracking_code)
    .service(placement::get_placement_by_id)
    .service(placement::update_placement_status);

    for &kind in ReferenceKind::ALL.iter() {
        cfg.service(reference::scope(kind));
    }

    cfg.default_service(web::to(|| async { Error::PathNotFound.error_response() }));
}

/// Opens the configured store, prepares it and seeds it if asked to.
pub async fn connect(config: &Config) -> Result<Box<dyn Database>, Error> {
    let db: Box<dyn Database> = match config.store {
        StoreBackend::Memory => {
            info!("using in-memory store");
            Box::new(MemoryDatabase::new())
        }
        StoreBackend::Mongo => {
            info!("connecting to db: {}", config.mongo_uri);
            let client = Client::with_uri_str(&config.mongo_uri).await?;
            Box::new(MongoDatabase::new(client.database(&config.database)))
        }
    };

    db.initialize().await?;

    if config.seed {
        seed::seed(&*db).await?;
    }

    Ok(db)
}

pub async fn run(config: Config) -> Result<(), Error> {
    let db = Data::new(connect(&config).await?);

    info!("listening on {}", config.bind);
    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await?;

    Ok(())
}
