use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson;
use mongodb::options::FindOptions;

use crate::database::{is_duplicate_key, MongoReferenceStore};
use crate::error::Error;

use super::{ReferenceEntity, ReferenceId, ReferenceKind};

#[async_trait]
pub trait ReferenceStore: Send + Sync {
    async fn insert_reference(
        &self,
        kind: ReferenceKind,
        reference: &ReferenceEntity,
    ) -> Result<(), Error>;

    /// All references of a kind, ordered by name.
    async fn fetch_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, Error>;

    async fn fetch_reference_by_id(
        &self,
        kind: ReferenceKind,
        reference_id: ReferenceId,
    ) -> Result<Option<ReferenceEntity>, Error>;

    /// Exact, case-sensitive match.
    async fn fetch_reference_by_name(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<Option<ReferenceEntity>, Error>;

    async fn update_reference_name(
        &self,
        kind: ReferenceKind,
        reference: ReferenceEntity,
        name: String,
    ) -> Result<ReferenceEntity, Error>;

    /// Returns whether anything was deleted.
    async fn delete_reference(
        &self,
        kind: ReferenceKind,
        reference_id: ReferenceId,
    ) -> Result<bool, Error>;
}

#[async_trait]
impl ReferenceStore for MongoReferenceStore {
    #[tracing::instrument(skip(self))]
    async fn insert_reference(
        &self,
        kind: ReferenceKind,
        reference: &ReferenceEntity,
    ) -> Result<(), Error> {
        self.collection(kind)
            .insert_one(reference, None)
            .await
            .map_err(|err| {
                if is_duplicate_key(&err) {
                    Error::DuplicateReferenceName {
                        kind,
                        name: reference.name.clone(),
                    }
                } else {
                    Error::from(err)
                }
            })?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, Error> {
        let options = FindOptions::builder().sort(bson::doc! { "name": 1 }).build();

        let references: Vec<ReferenceEntity> = self
            .collection(kind)
            .find(bson::doc! {}, options)
            .await?
            .try_collect()
            .await?;

        Ok(references)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_reference_by_id(
        &self,
        kind: ReferenceKind,
        reference_id: ReferenceId,
    ) -> Result<Option<ReferenceEntity>, Error> {
        let reference = self
            .collection(kind)
            .find_one(bson::doc! { "_id": reference_id }, None)
            .await?;

        Ok(reference)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_reference_by_name(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<Option<ReferenceEntity>, Error> {
        let reference = self
            .collection(kind)
            .find_one(bson::doc! { "name": name }, None)
            .await?;

        Ok(reference)
    }

    #[tracing::instrument(skip(self))]
    async fn update_reference_name(
        &self,
        kind: ReferenceKind,
        mut reference: ReferenceEntity,
        name: String,
    ) -> Result<ReferenceEntity, Error> {
        let now = Utc::now();
        let old_modified_at = bson::DateTime::from_chrono(reference.modified_at);
        let new_modified_at = bson::DateTime::from_chrono(now);

        let result = self
            .collection(kind)
            .update_one(
                bson::doc! { "_id": reference.id, "modified_at": old_modified_at },
                bson::doc! { "$set": { "name": name.as_str(), "modified_at": new_modified_at } },
                None,
            )
            .await
            .map_err(|err| {
                if is_duplicate_key(&err) {
                    Error::DuplicateReferenceName {
                        kind,
                        name: name.clone(),
                    }
                } else {
                    Error::from(err)
                }
            })?;

        if result.matched_count == 0 {
            return Err(Error::ConcurrentModificationDetected);
        }

        reference.modified_at = now;
        reference.name = name;

        Ok(reference)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_reference(
        &self,
        kind: ReferenceKind,
        reference_id: ReferenceId,
    ) -> Result<bool, Error> {
        let result = self
            .collection(kind)
            .delete_one(bson::doc! { "_id": reference_id }, None)
            .await?;

        Ok(result.deleted_count > 0)
    }
}
