//! Shared, lock-guarded storage for connectors and sources.
//!
//! The main components are:
//! - `Collections`: the two record vectors, kept in insertion order. All
//!   lookups and writes are synchronous methods on this type.
//! - `RecordStore`: a clonable handle holding `Collections` behind a single
//!   `Arc<RwLock>`. It is created in `main.rs` and injected into the Actix
//!   application as `web::Data`. Reads share the lock; every mutation runs
//!   under the exclusive guard, which makes a whole batch one critical
//!   section.
//!
//! Lookups are linear scans. Both collections hold a handful of records per
//! deployment.

use common::model::connector::Connector;
use common::model::source::{Source, SourceType};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Collections {
    connectors: Vec<Connector>,
    sources: Vec<Source>,
}

impl Collections {
    pub fn new(connectors: Vec<Connector>, sources: Vec<Source>) -> Self {
        Self {
            connectors,
            sources,
        }
    }

    /// First connector with this id, if any.
    pub fn get_connector(&self, id: Uuid) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    /// Every connector carrying this id. More than one means the fixture
    /// data broke the uniqueness invariant.
    pub fn connectors_with_id(&self, id: Uuid) -> impl Iterator<Item = &Connector> + '_ {
        self.connectors.iter().filter(move |c| c.id == id)
    }

    pub fn get_source(&self, connector_id: Uuid, source_type: SourceType) -> Option<&Source> {
        self.sources_with_key(connector_id, source_type).next()
    }

    /// Every source stored under `(connector_id, source_type)`.
    pub fn sources_with_key(
        &self,
        connector_id: Uuid,
        source_type: SourceType,
    ) -> impl Iterator<Item = &Source> + '_ {
        self.sources
            .iter()
            .filter(move |s| s.connector_id == connector_id && s.source_type == source_type)
    }

    pub fn list_connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn list_sources(&self) -> &[Source] {
        &self.sources
    }

    /// Sources owned by `connector_id`, in store order. Possibly empty.
    pub fn list_sources_for(&self, connector_id: Uuid) -> impl Iterator<Item = &Source> + '_ {
        self.sources
            .iter()
            .filter(move |s| s.connector_id == connector_id)
    }

    /// Overwrites the connector with the same id in place.
    ///
    /// Returns `false` and changes nothing when no such connector exists;
    /// callers resolve identity first.
    pub fn replace_connector(&mut self, connector: Connector) -> bool {
        match self.connectors.iter_mut().find(|c| c.id == connector.id) {
            Some(slot) => {
                *slot = connector;
                true
            }
            None => false,
        }
    }

    /// Overwrites the source with the same `(connector_id, type)` in place.
    /// Same no-op contract as `replace_connector`.
    pub fn replace_source(&mut self, source: Source) -> bool {
        match self.sources.iter_mut().find(|s| {
            s.connector_id == source.connector_id && s.source_type == source.source_type
        }) {
            Some(slot) => {
                *slot = source;
                true
            }
            None => false,
        }
    }

    /// Appends a connector. Uniqueness is the caller's concern.
    pub fn insert_connector(&mut self, connector: Connector) {
        self.connectors.push(connector);
    }

    /// Appends a source. Uniqueness is the caller's concern.
    pub fn insert_source(&mut self, source: Source) {
        self.sources.push(source);
    }

    /// Removes the connector and every source it owns.
    pub fn remove_connector(&mut self, id: Uuid) -> Option<(Connector, Vec<Source>)> {
        let pos = self.connectors.iter().position(|c| c.id == id)?;
        let connector = self.connectors.remove(pos);
        let (owned, kept): (Vec<Source>, Vec<Source>) = std::mem::take(&mut self.sources)
            .into_iter()
            .partition(|s| s.connector_id == id);
        self.sources = kept;
        Some((connector, owned))
    }

    pub fn remove_source(&mut self, connector_id: Uuid, source_type: SourceType) -> Option<Source> {
        let pos = self
            .sources
            .iter()
            .position(|s| s.connector_id == connector_id && s.source_type == source_type)?;
        Some(self.sources.remove(pos))
    }
}

/// Clonable handle to the store shared across all requests.
#[derive(Clone, Default)]
pub struct RecordStore {
    inner: Arc<RwLock<Collections>>,
}

impl RecordStore {
    pub fn new(collections: Collections) -> Self {
        Self {
            inner: Arc::new(RwLock::new(collections)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().await
    }
}
