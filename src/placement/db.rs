use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson;
use mongodb::options::FindOptions;

use crate::database::{is_duplicate_key, MongoPlacementStore};
use crate::error::Error;

use super::{Placement, PlacementId, PlacementStatus};

#[async_trait]
pub trait PlacementStore: Send + Sync {
    async fn insert_placement(&self, placement: &Placement) -> Result<(), Error>;

    /// All placements, newest first.
    async fn fetch_placements(&self) -> Result<Vec<Placement>, Error>;

    async fn fetch_placement_by_id(
        &self,
        placement_id: PlacementId,
    ) -> Result<Option<Placement>, Error>;

    async fn fetch_placement_by_tracking_code(
        &self,
        tracking_code: &str,
    ) -> Result<Option<Placement>, Error>;

    async fn update_placement_status(
        &self,
        placement: Placement,
        status: PlacementStatus,
    ) -> Result<Placement, Error>;
}

#[async_trait]
impl PlacementStore for MongoPlacementStore {
    #[tracing::instrument(skip(self))]
    async fn insert_placement(&self, placement: &Placement) -> Result<(), Error> {
        self.insert_one(placement, None).await.map_err(|err| {
            if is_duplicate_key(&err) {
                Error::DuplicateTrackingCode {
                    tracking_code: placement.tracking_code.clone(),
                }
            } else {
                Error::from(err)
            }
        })?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_placements(&self) -> Result<Vec<Placement>, Error> {
        let options = FindOptions::builder()
            .sort(bson::doc! { "created_at": -1 })
            .build();

        let placements: Vec<Placement> = self
            .find(bson::doc! {}, options)
            .await?
            .try_collect()
            .await?;

        Ok(placements)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_placement_by_id(
        &self,
        placement_id: PlacementId,
    ) -> Result<Option<Placement>, Error> {
        let placement = self
            .find_one(bson::doc! { "_id": placement_id }, None)
            .await?;

        Ok(placement)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_placement_by_tracking_code(
        &self,
        tracking_code: &str,
    ) -> Result<Option<Placement>, Error> {
        let placement = self
            .find_one(bson::doc! { "tracking_code": tracking_code }, None)
            .await?;

        Ok(placement)
    }

    #[tracing::instrument(skip(self))]
    async fn update_placement_status(
        &self,
        mut placement: Placement,
        status: PlacementStatus,
    ) -> Result<Placement, Error> {
        let now = Utc::now();
        let old_modified_at = bson::DateTime::from_chrono(placement.modified_at);
        let new_modified_at = bson::DateTime::from_chrono(now);
        let new_status = bson::to_bson(&status)?;

        let result = self
            .update_one(
                bson::doc! { "_id": placement.id, "modified_at": old_modified_at },
                bson::doc! { "$set": { "status": new_status, "modified_at": new_modified_at } },
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(Error::ConcurrentModificationDetected);
        }

        placement.modified_at = now;
        placement.status = status;

        Ok(placement)
    }
}
