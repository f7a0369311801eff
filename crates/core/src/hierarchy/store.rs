//! Persistence seam for locations.
//!
//! [`LocationStore`] is the only component allowed to perform durable
//! writes. Every operation runs inside a [`LocationTx`] unit of work so that
//! validation and the mutation it guards see the same data. Units opened
//! with [`LocationStore::write`] are serialized against each other until
//! they commit or are dropped; dropping a unit without committing discards
//! all of its changes.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::hierarchy::command::{CreateLocation, UpdateLocation};
use crate::hierarchy::location::Location;
use crate::types::DbId;

#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Open a read-only unit of work.
    async fn read(&self) -> Result<Box<dyn LocationTx>, CoreError>;

    /// Open a unit of work that may mutate the hierarchy. Only one write
    /// unit is active at a time.
    async fn write(&self) -> Result<Box<dyn LocationTx>, CoreError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), CoreError>;
}

/// A single unit of work against the location store.
#[async_trait]
pub trait LocationTx: Send {
    async fn get(&mut self, id: DbId) -> Result<Option<Location>, CoreError>;

    /// All locations, in no particular order.
    async fn list(&mut self) -> Result<Vec<Location>, CoreError>;

    async fn create(&mut self, input: &CreateLocation) -> Result<Location, CoreError>;

    /// Returns `None` if no location has this id.
    async fn update(
        &mut self,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, CoreError>;

    /// Returns `false` if no location has this id.
    async fn delete(&mut self, id: DbId) -> Result<bool, CoreError>;

    /// Number of locations whose parent is `parent_id`.
    async fn count_children(&mut self, parent_id: DbId) -> Result<i64, CoreError>;

    /// Number of boxes stored directly at `location_id`.
    async fn count_boxes(&mut self, location_id: DbId) -> Result<i64, CoreError>;

    /// Number of items inside boxes stored directly at `location_id`.
    async fn count_items(&mut self, location_id: DbId) -> Result<i64, CoreError>;

    async fn commit(self: Box<Self>) -> Result<(), CoreError>;
}
