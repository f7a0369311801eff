//! In-memory [`LocationStore`] used by tests and local development.
//!
//! The whole state sits behind one `tokio::sync::Mutex`. A write unit holds
//! the owned guard for its lifetime and works on a copy that replaces the
//! shared state on commit, so an uncommitted unit leaves no trace. Read
//! units work on a snapshot taken when they open.
//!
//! The same referential rules the PostgreSQL schema enforces are applied
//! here: parents must exist, a location cannot be its own parent, and a
//! location still referenced by children or boxes cannot be removed.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::CoreError;
use crate::hierarchy::command::{CreateLocation, UpdateLocation};
use crate::hierarchy::location::Location;
use crate::hierarchy::store::{LocationStore, LocationTx};
use crate::types::DbId;

#[derive(Debug, Clone)]
struct StoredBox {
    location_id: DbId,
    item_count: i64,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    last_location_id: DbId,
    last_box_id: DbId,
    locations: BTreeMap<DbId, Location>,
    boxes: BTreeMap<DbId, StoredBox>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryLocationStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a box holding `item_count` items at `location_id`.
    ///
    /// Stands in for the box collaborator so deletion rules can be exercised.
    pub async fn insert_box(&self, location_id: DbId, item_count: i64) -> Result<DbId, CoreError> {
        let mut state = self.state.lock().await;
        if !state.locations.contains_key(&location_id) {
            return Err(CoreError::Conflict(format!(
                "Box references missing location {location_id}"
            )));
        }
        state.last_box_id += 1;
        let id = state.last_box_id;
        state.boxes.insert(
            id,
            StoredBox {
                location_id,
                item_count,
            },
        );
        Ok(id)
    }

    /// Remove a box. Returns `false` if it did not exist.
    pub async fn remove_box(&self, box_id: DbId) -> bool {
        self.state.lock().await.boxes.remove(&box_id).is_some()
    }
}

#[async_trait]
impl LocationStore for InMemoryLocationStore {
    async fn read(&self) -> Result<Box<dyn LocationTx>, CoreError> {
        let snapshot = self.state.lock().await.clone();
        Ok(Box::new(MemoryTx {
            guard: None,
            working: snapshot,
        }))
    }

    async fn write(&self) -> Result<Box<dyn LocationTx>, CoreError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTx {
            guard: Some(guard),
            working,
        }))
    }

    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

struct MemoryTx {
    /// Present only for write units.
    guard: Option<OwnedMutexGuard<MemoryState>>,
    working: MemoryState,
}

impl MemoryTx {
    fn ensure_writable(&self) -> Result<(), CoreError> {
        if self.guard.is_none() {
            return Err(CoreError::Internal(
                "Attempted to modify locations in a read-only unit of work".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_parent(&self, id: Option<DbId>, parent_id: DbId) -> Result<(), CoreError> {
        if Some(parent_id) == id {
            return Err(CoreError::Conflict(
                "A location cannot be its own parent".to_string(),
            ));
        }
        if !self.working.locations.contains_key(&parent_id) {
            return Err(CoreError::Conflict(format!(
                "Parent location {parent_id} does not exist"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl LocationTx for MemoryTx {
    async fn get(&mut self, id: DbId) -> Result<Option<Location>, CoreError> {
        Ok(self.working.locations.get(&id).cloned())
    }

    async fn list(&mut self) -> Result<Vec<Location>, CoreError> {
        Ok(self.working.locations.values().cloned().collect())
    }

    async fn create(&mut self, input: &CreateLocation) -> Result<Location, CoreError> {
        self.ensure_writable()?;
        if let Some(parent_id) = input.parent_id {
            self.ensure_parent(None, parent_id)?;
        }
        self.working.last_location_id += 1;
        let now = Utc::now();
        let location = Location {
            id: self.working.last_location_id,
            name: input.name.clone(),
            description: input.description.clone(),
            parent_id: input.parent_id,
            created_at: now,
            updated_at: now,
        };
        self.working
            .locations
            .insert(location.id, location.clone());
        Ok(location)
    }

    async fn update(
        &mut self,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, CoreError> {
        self.ensure_writable()?;
        if !self.working.locations.contains_key(&id) {
            return Ok(None);
        }
        if let Some(parent_id) = input.new_parent_id() {
            self.ensure_parent(Some(id), parent_id)?;
        }

        let Some(location) = self.working.locations.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            location.name = name.clone();
        }
        if let Some(description) = &input.description {
            location.description = description.clone();
        }
        if let Some(parent_id) = input.parent_id {
            location.parent_id = parent_id;
        }
        location.updated_at = Utc::now();
        Ok(Some(location.clone()))
    }

    async fn delete(&mut self, id: DbId) -> Result<bool, CoreError> {
        self.ensure_writable()?;
        if !self.working.locations.contains_key(&id) {
            return Ok(false);
        }
        let referenced = self
            .working
            .locations
            .values()
            .any(|l| l.parent_id == Some(id))
            || self.working.boxes.values().any(|b| b.location_id == id);
        if referenced {
            return Err(CoreError::Conflict(format!(
                "Location {id} is still referenced"
            )));
        }
        self.working.locations.remove(&id);
        Ok(true)
    }

    async fn count_children(&mut self, parent_id: DbId) -> Result<i64, CoreError> {
        let count = self
            .working
            .locations
            .values()
            .filter(|l| l.parent_id == Some(parent_id))
            .count();
        Ok(count as i64)
    }

    async fn count_boxes(&mut self, location_id: DbId) -> Result<i64, CoreError> {
        let count = self
            .working
            .boxes
            .values()
            .filter(|b| b.location_id == location_id)
            .count();
        Ok(count as i64)
    }

    async fn count_items(&mut self, location_id: DbId) -> Result<i64, CoreError> {
        Ok(self
            .working
            .boxes
            .values()
            .filter(|b| b.location_id == location_id)
            .map(|b| b.item_count)
            .sum())
    }

    async fn commit(self: Box<Self>) -> Result<(), CoreError> {
        let MemoryTx { guard, working } = *self;
        if let Some(mut guard) = guard {
            *guard = working;
        }
        Ok(())
    }
}
