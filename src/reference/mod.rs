use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod gateway;
pub mod manager;
pub use endpoints::*;

pub type ReferenceId = TypedId<ReferenceEntity>;

/// A named lookup row: a partner, a third party, a channel type or a
/// category. Names are unique within their kind.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ReferenceEntity {
    #[serde(rename = "_id")]
    pub id: ReferenceId,
    pub name: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub modified_at: DateTime<Utc>,
}

impl TypedIdMarker for ReferenceEntity {
    fn tag() -> &'static str {
        "REF"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    Partner,
    ThirdParty,
    ChannelType,
    Category,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 4] = [
        ReferenceKind::Partner,
        ReferenceKind::ThirdParty,
        ReferenceKind::ChannelType,
        ReferenceKind::Category,
    ];

    pub fn collection_name(self) -> &'static str {
        match self {
            ReferenceKind::Partner => "partners",
            ReferenceKind::ThirdParty => "third_parties",
            ReferenceKind::ChannelType => "channel_types",
            ReferenceKind::Category => "categories",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            ReferenceKind::Partner => "/api/partners",
            ReferenceKind::ThirdParty => "/api/third-parties",
            ReferenceKind::ChannelType => "/api/channel-types",
            ReferenceKind::Category => "/api/categories",
        }
    }
}
