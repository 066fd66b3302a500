use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::CampaignDraft;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub mod tracking;
pub use endpoints::*;

pub type PlacementId = TypedId<Placement>;

/// A persisted campaign tracking record.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Placement {
    #[serde(rename = "_id")]
    pub id: PlacementId,
    pub tracking_code: String,
    pub tracking_url: String,
    pub status: PlacementStatus,
    pub draft: CampaignDraft,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub modified_at: DateTime<Utc>,
}

impl TypedIdMarker for Placement {
    fn tag() -> &'static str {
        "PLC"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementStatus {
    Draft,
    Active,
    Paused,
    Archived,
}
