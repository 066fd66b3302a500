use async_trait::async_trait;

use crate::error::Error;
use crate::placement::db::PlacementStore;
use crate::placement::{Placement, PlacementId, PlacementStatus};
use crate::reference::db::ReferenceStore;
use crate::reference::{ReferenceEntity, ReferenceId, ReferenceKind};

use super::Database;

type Hook<Args, R> = Box<dyn Fn(Args) -> Result<R, Error> + Send + Sync>;

pub struct MockDatabase {
    pub references: MockReferenceStore,
    pub placements: MockPlacementStore,
}

impl MockDatabase {
    pub fn new() -> MockDatabase {
        MockDatabase {
            references: MockReferenceStore::new(),
            placements: MockPlacementStore::new(),
        }
    }
}

#[async_trait]
impl Database for MockDatabase {
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

pub struct MockReferenceStore {
    pub on_insert_reference: Hook<(ReferenceKind, ReferenceEntity), ()>,
    pub on_fetch_references: Hook<ReferenceKind, Vec<ReferenceEntity>>,
    pub on_fetch_reference_by_id: Hook<(ReferenceKind, ReferenceId), Option<ReferenceEntity>>,
    pub on_fetch_reference_by_name: Hook<(ReferenceKind, String), Option<ReferenceEntity>>,
    pub on_update_reference_name: Hook<(ReferenceKind, ReferenceEntity, String), ReferenceEntity>,
    pub on_delete_reference: Hook<(ReferenceKind, ReferenceId), bool>,
}

impl MockReferenceStore {
    pub fn new() -> MockReferenceStore {
        MockReferenceStore {
            on_insert_reference: Box::new(|_| panic!("unexpected call to insert_reference")),
            on_fetch_references: Box::new(|_| panic!("unexpected call to fetch_references")),
            on_fetch_reference_by_id: Box::new(|_| {
                panic!("unexpected call to fetch_reference_by_id")
            }),
            on_fetch_reference_by_name: Box::new(|_| {
                panic!("unexpected call to fetch_reference_by_name")
            }),
            on_update_reference_name: Box::new(|_| {
                panic!("unexpected call to update_reference_name")
            }),
            on_delete_reference: Box::new(|_| panic!("unexpected call to delete_reference")),
        }
    }
}

#[async_trait]
impl ReferenceStore for MockReferenceStore {
    async fn insert_reference(
        &self,
        kind: ReferenceKind,
        reference: &ReferenceEntity,
    ) -> Result<(), Error> {
        (self.on_insert_reference)((kind, reference.clone()))
    }

    async fn fetch_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, Error> {
        (self.on_fetch_references)(kind)
    }

    async fn fetch_reference_by_id(
        &self,
        kind: ReferenceKind,
        reference_id: ReferenceId,
    ) -> Result<Option<ReferenceEntity>, Error> {
        (self.on_fetch_reference_by_id)((kind, reference_id))
    }

    async fn fetch_reference_by_name(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<Option<ReferenceEntity>, Error> {
        (self.on_fetch_reference_by_name)((kind, name.to_string()))
    }

    async fn update_reference_name(
        &self,
        kind: ReferenceKind,
        reference: ReferenceEntity,
        name: String,
    ) -> Result<ReferenceEntity, Error> {
        (self.on_update_reference_name)((kind, reference, name))
    }

    async fn delete_reference(
        &self,
        kind: ReferenceKind,
        reference_id: ReferenceId,
    ) -> Result<bool, Error> {
        (self.on_delete_reference)((kind, reference_id))
    }
}

pub struct MockPlacementStore {
    pub on_insert_placement: Hook<Placement, ()>,
    pub on_fetch_placements: Hook<(), Vec<Placement>>,
    pub on_fetch_placement_by_id: Hook<PlacementId, Option<Placement>>,
    pub on_fetch_placement_by_tracking_code: Hook<String, Option<Placement>>,
    pub on_update_placement_status: Hook<(Placement, PlacementStatus), Placement>,
}

impl MockPlacementStore {
    pub fn new() -> MockPlacementStore {
        MockPlacementStore {
            on_insert_placement: Box::new(|_| panic!("unexpected call to insert_placement")),
            on_fetch_placements: Box::new(|_| panic!("unexpected call to fetch_placements")),
            on_fetch_placement_by_id: Box::new(|_| {
                panic!("unexpected call to fetch_placement_by_id")
            }),
            on_fetch_placement_by_tracking_code: Box::new(|_| {
                panic!("unexpected call to fetch_placement_by_tracking_code")
            }),
            on_update_placement_status: Box::new(|_| {
                panic!("unexpected call to update_placement_status")
            }),
        }
    }
}

#[async_trait]
impl PlacementStore for MockPlacementStore {
    async fn insert_placement(&self, placement: &Placement) -> Result<(), Error> {
        (self.on_insert_placement)(placement.clone())
    }

    async fn fetch_placements(&self) -> Result<Vec<Placement>, Error> {
        (self.on_fetch_placements)(())
    }

    async fn fetch_placement_by_id(
        &self,
        placement_id: PlacementId,
    ) -> Result<Option<Placement>, Error> {
        (self.on_fetch_placement_by_id)(placement_id)
    }

    async fn fetch_placement_by_tracking_code(
        &self,
        tracking_code: &str,
    ) -> Result<Option<Placement>, Error> {
        (self.on_fetch_placement_by_tracking_code)(tracking_code.to_string())
    }

    async fn update_placement_status(
        &self,
        placement: Placement,
        status: PlacementStatus,
    ) -> Result<Placement, Error> {
        (self.on_update_placement_status)((placement, status))
    }
}
