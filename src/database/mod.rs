use async_trait::async_trait;
use mongodb::bson::{self, Document};
use mongodb::error::{Error as DatabaseError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::error::Error;
use crate::placement::db::PlacementStore;
use crate::placement::Placement;
use crate::reference::db::ReferenceStore;
use crate::reference::{ReferenceEntity, ReferenceKind};

mod memory;
#[cfg(test)]
pub mod test;

pub use memory::MemoryDatabase;

#[async_trait]
pub trait Database: Send + Sync {
    fn references(&self) -> &dyn ReferenceStore;

    fn placements(&self) -> &dyn PlacementStore;

    /// Prepares indexes and anything else the store needs before serving.
    async fn initialize(&self) -> Result<(), Error>;
}

pub type MongoPlacementStore = Collection<Placement>;

#[derive(Debug, Clone)]
pub struct MongoReferenceStore {
    partners: Collection<ReferenceEntity>,
    third_parties: Collection<ReferenceEntity>,
    channel_types: Collection<ReferenceEntity>,
    categories: Collection<ReferenceEntity>,
}

impl MongoReferenceStore {
    pub fn collection(&self, kind: ReferenceKind) -> &Collection<ReferenceEntity> {
        match kind {
            ReferenceKind::Partner => &self.partners,
            ReferenceKind::ThirdParty => &self.third_parties,
            ReferenceKind::ChannelType => &self.channel_types,
            ReferenceKind::Category => &self.categories,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MongoDatabase {
    references: MongoReferenceStore,
    placements: MongoPlacementStore,
}

impl MongoDatabase {
    pub fn new(db: mongodb::Database) -> MongoDatabase {
        MongoDatabase {
            references: MongoReferenceStore {
                partners: db.collection(ReferenceKind::Partner.collection_name()),
                third_parties: db.collection(ReferenceKind::ThirdParty.collection_name()),
                channel_types: db.collection(ReferenceKind::ChannelType.collection_name()),
                categories: db.collection(ReferenceKind::Category.collection_name()),
            },
            placements: db.collection("placements"),
        }
    }
}

async fn create_unique_index<T>(collection: &Collection<T>, keys: Document) -> Result<(), Error>
where
    T: Send + Sync,
{
    let index = IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build();
    collection.create_index(index, None).await?;

    Ok(())
}

#[async_trait]
impl Database for MongoDatabase {
    fn references(&self) -> &dyn ReferenceStore {
        &self.references
    }

    fn placements(&self) -> &dyn PlacementStore {
        &self.placements
    }

    #[tracing::instrument(skip(self))]
    async fn initialize(&self) -> Result<(), Error> {
        for &kind in ReferenceKind::ALL.iter() {
            create_unique_index(self.references.collection(kind), bson::doc! { "name": 1 })
                .await?;
        }
        create_unique_index(&self.placements, bson::doc! { "tracking_code": 1 }).await?;

        Ok(())
    }
}

/// Whether the store rejected a write because it would break a unique index.
pub fn is_duplicate_key(error: &DatabaseError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}
