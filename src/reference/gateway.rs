//! Client-facing access to reference records.
//!
//! [`ReferenceGateway`] is the request/response boundary to wherever the
//! authoritative records live. [`ReferenceDirectory`] sits on the caller's
//! side of it and keeps a local view per kind: creates show up immediately,
//! then the view is replaced with the authoritative list once the store
//! confirms. A failed create is rolled back.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::database::Database;
use crate::error::Error;

use super::{manager, ReferenceEntity, ReferenceId, ReferenceKind};

#[async_trait]
pub trait ReferenceGateway {
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, Error>;

    async fn exists(&self, kind: ReferenceKind, name: &str) -> Result<bool, Error>;

    async fn create(&self, kind: ReferenceKind, name: &str) -> Result<ReferenceEntity, Error>;
}

/// Talks to the store directly, for callers living in the same process.
pub struct DatabaseGateway<'a> {
    db: &'a dyn Database,
}

impl<'a> DatabaseGateway<'a> {
    pub fn new(db: &'a dyn Database) -> DatabaseGateway<'a> {
        DatabaseGateway { db }
    }
}

#[async_trait]
impl<'a> ReferenceGateway for DatabaseGateway<'a> {
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, Error> {
        manager::get_references(self.db, kind).await
    }

    async fn exists(&self, kind: ReferenceKind, name: &str) -> Result<bool, Error> {
        manager::reference_exists(self.db, kind, name).await
    }

    async fn create(&self, kind: ReferenceKind, name: &str) -> Result<ReferenceEntity, Error> {
        manager::create_reference(self.db, kind, name).await
    }
}

/// A row in the local view. `id` is `None` while the create that produced
/// it has not been confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: Option<ReferenceId>,
    pub name: String,
}

impl From<ReferenceEntity> for DirectoryEntry {
    fn from(reference: ReferenceEntity) -> DirectoryEntry {
        DirectoryEntry {
            id: Some(reference.id),
            name: reference.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Pending,
    Ready,
    /// The last call failed; the notice is meant for display and the view
    /// still holds whatever it had before.
    Failed(String),
}

#[derive(Clone, Debug)]
struct View {
    entries: Vec<DirectoryEntry>,
    state: FetchState,
}

impl Default for View {
    fn default() -> View {
        View {
            entries: vec![],
            state: FetchState::Idle,
        }
    }
}

impl View {
    fn replace(&mut self, references: Vec<ReferenceEntity>) {
        self.entries = references.into_iter().map(DirectoryEntry::from).collect();
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
        self.state = FetchState::Ready;
    }
}

pub struct ReferenceDirectory<G> {
    gateway: G,
    views: BTreeMap<ReferenceKind, View>,
}

impl<G: ReferenceGateway> ReferenceDirectory<G> {
    pub fn new(gateway: G) -> ReferenceDirectory<G> {
        ReferenceDirectory {
            gateway,
            views: BTreeMap::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The local view of a kind; empty until the first successful refresh.
    pub fn entries(&self, kind: ReferenceKind) -> &[DirectoryEntry] {
        self.views
            .get(&kind)
            .map(|view| view.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn state(&self, kind: ReferenceKind) -> FetchState {
        self.views
            .get(&kind)
            .map(|view| view.state.clone())
            .unwrap_or(FetchState::Idle)
    }

    pub fn contains(&self, kind: ReferenceKind, name: &str) -> bool {
        self.entries(kind).iter().any(|entry| entry.name == name)
    }

    #[tracing::instrument(skip(self))]
    pub async fn refresh(&mut self, kind: ReferenceKind) -> Result<(), Error> {
        self.views.entry(kind).or_default().state = FetchState::Pending;

        let result = self.gateway.list(kind).await;

        let view = self.views.entry(kind).or_default();
        match result {
            Ok(references) => {
                view.replace(references);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(?kind, "failed to fetch references: {}", err);
                view.state = FetchState::Failed(err.error_message().to_string());
                Err(err)
            }
        }
    }

    /// Creates a reference, showing it locally before the gateway answers.
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &mut self,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<ReferenceEntity, Error> {
        let name = manager::normalize_name(kind, name)?;
        if self.contains(kind, &name) {
            return Err(Error::DuplicateReferenceName { kind, name });
        }

        let view = self.views.entry(kind).or_default();
        let previous_state = view.state.clone();
        view.entries.push(DirectoryEntry {
            id: None,
            name: name.clone(),
        });
        view.entries.sort_by(|a, b| a.name.cmp(&b.name));
        view.state = FetchState::Pending;

        let created = self.gateway.create(kind, &name).await;

        let view = self.views.entry(kind).or_default();
        let reference = match created {
            Ok(reference) => reference,
            Err(err) => {
                view.entries
                    .retain(|entry| !(entry.id.is_none() && entry.name == name));
                view.state = match &err {
                    Error::DuplicateReferenceName { .. } | Error::InvalidReferenceName { .. } => {
                        previous_state
                    }
                    _ => FetchState::Failed(err.error_message().to_string()),
                };
                if let Error::DuplicateReferenceName { .. } = err {
                    // the store holds a name this view has not seen yet
                    if let Err(refresh_err) = self.refresh(kind).await {
                        tracing::debug!(?kind, "refresh after duplicate failed: {}", refresh_err);
                    }
                }
                return Err(err);
            }
        };

        if let Some(entry) = view
            .entries
            .iter_mut()
            .find(|entry| entry.id.is_none() && entry.name == name)
        {
            entry.id = Some(reference.id);
        }

        let authoritative = self.gateway.list(kind).await;

        let view = self.views.entry(kind).or_default();
        match authoritative {
            Ok(references) => view.replace(references),
            Err(err) => {
                tracing::warn!(?kind, "failed to reconcile references: {}", err);
                view.state = FetchState::Failed(err.error_message().to_string());
            }
        }

        Ok(reference)
    }
}
