use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::Error;
use crate::placement::db::PlacementStore;
use crate::placement::{Placement, PlacementId, PlacementStatus};
use crate::reference::db::ReferenceStore;
use crate::reference::{ReferenceEntity, ReferenceId, ReferenceKind};

use super::Database;

/// A process-local store with the same observable behavior as the mongo
/// collections, including unique names and the `modified_at` guard.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    references: MemoryReferenceStore,
    placements: MemoryPlacementStore,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        MemoryDatabase::default()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    fn references(&self) -> &dyn ReferenceStore {
        &self.references
    }

    fn placements(&self) -> &dyn PlacementStore {
        &self.placements
    }

    async fn initialize(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryReferenceStore {
    references: Mutex<BTreeMap<ReferenceKind, Vec<ReferenceEntity>>>,
}

#[async_trait]
impl ReferenceStore for MemoryReferenceStore {
    #[tracing::instrument(skip(self))]
    async fn insert_reference(
        &self,
        kind: ReferenceKind,
        reference: &ReferenceEntity,
    ) -> Result<(), Error> {
        let mut references = self.references.lock().await;
        let references = references.entry(kind).or_default();

        if references.iter().any(|r| r.name == reference.name) {
            return Err(Error::DuplicateReferenceName {
                kind,
                name: reference.name.clone(),
            });
        }

        references.push(reference.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, Error> {
        let references = self.references.lock().await;
        let mut references = references.get(&kind).cloned().unwrap_or_default();
        references.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(references)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_reference_by_id(
        &self,
        kind: ReferenceKind,
        reference_id: ReferenceId,
    ) -> Result<Option<ReferenceEntity>, Error> {
        let references = self.references.lock().await;
        let reference = references
            .get(&kind)
            .and_then(|references| references.iter().find(|r| r.id == reference_id))
            .cloned();

        Ok(reference)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_reference_by_name(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<Option<ReferenceEntity>, Error> {
        let references = self.references.lock().await;
        let reference = references
            .get(&kind)
            .and_then(|references| references.iter().find(|r| r.name == name))
            .cloned();

        Ok(reference)
    }

    #[tracing::instrument(skip(self))]
    async fn update_reference_name(
        &self,
        kind: ReferenceKind,
        mut reference: ReferenceEntity,
        name: String,
    ) -> Result<ReferenceEntity, Error> {
        let mut references = self.references.lock().await;
        let references = references.entry(kind).or_default();

        if references
            .iter()
            .any(|r| r.id != reference.id && r.name == name)
        {
            return Err(Error::DuplicateReferenceName { kind, name });
        }

        let stored = references
            .iter_mut()
            .find(|r| r.id == reference.id && r.modified_at == reference.modified_at)
            .ok_or(Error::ConcurrentModificationDetected)?;

        reference.modified_at = Utc::now();
        reference.name = name;
        *stored = reference.clone();

        Ok(reference)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_reference(
        &self,
        kind: ReferenceKind,
        reference_id: ReferenceId,
    ) -> Result<bool, Error> {
        let mut references = self.references.lock().await;
        let references = references.entry(kind).or_default();

        let before = references.len();
        references.retain(|r| r.id != reference_id);

        Ok(references.len() < before)
    }
}

#[derive(Debug, Default)]
struct MemoryPlacementStore {
    placements: Mutex<Vec<Placement>>,
}

#[async_trait]
impl PlacementStore for MemoryPlacementStore {
    #[tracing::instrument(skip(self))]
    async fn insert_placement(&self, placement: &Placement) -> Result<(), Error> {
        let mut placements = self.placements.lock().await;

        if placements
            .iter()
            .any(|p| p.tracking_code == placement.tracking_code)
        {
            return Err(Error::DuplicateTrackingCode {
                tracking_code: placement.tracking_code.clone(),
            });
        }

        placements.push(placement.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_placements(&self) -> Result<Vec<Placement>, Error> {
        let mut placements = self.placements.lock().await.clone();
        placements.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(placements)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_placement_by_id(
        &self,
        placement_id: PlacementId,
    ) -> Result<Option<Placement>, Error> {
        let placements = self.placements.lock().await;
        let placement = placements.iter().find(|p| p.id == placement_id).cloned();

        Ok(placement)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_placement_by_tracking_code(
        &self,
        tracking_code: &str,
    ) -> Result<Option<Placement>, Error> {
        let placements = self.placements.lock().await;
        let placement = placements
            .iter()
            .find(|p| p.tracking_code == tracking_code)
            .cloned();

        Ok(placement)
    }

    #[tracing::instrument(skip(self))]
    async fn update_placement_status(
        &self,
        mut placement: Placement,
        status: PlacementStatus,
    ) -> Result<Placement, Error> {
        let mut placements = self.placements.lock().await;

        let stored = placements
            .iter_mut()
            .find(|p| p.id == placement.id && p.modified_at == placement.modified_at)
            .ok_or(Error::ConcurrentModificationDetected)?;

        placement.modified_at = Utc::now();
        placement.status = status;
        *stored = placement.clone();

        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::CampaignDraft;

    fn placement(tracking_code: &str) -> Placement {
        let now = Utc::now();
        Placement {
            id: PlacementId::new(),
            tracking_code: tracking_code.to_string(),
            tracking_url: format!("https://example.com/?utm_campaign={}", tracking_code),
            status: PlacementStatus::Draft,
            draft: CampaignDraft::default(),
            created_at: now,
            modified_at: now,
        }
    }

    #[tokio::test]
    async fn duplicate_tracking_code_is_reported_as_collision() {
        let db = MemoryDatabase::new();
        db.placements()
            .insert_placement(&placement("ABCDEFGH23"))
            .await
            .unwrap();

        let result = db
            .placements()
            .insert_placement(&placement("ABCDEFGH23"))
            .await;

        assert_eq!(
            result.unwrap_err(),
            Error::DuplicateTrackingCode {
                tracking_code: "ABCDEFGH23".to_string()
            }
        );
    }
}
