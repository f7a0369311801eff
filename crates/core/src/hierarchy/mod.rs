//! Location hierarchy: the self-referential tree of storage locations.
//!
//! Locations form a forest through their optional `parent_id`. This module
//! keeps that forest valid:
//!
//! - [`cycle_guard`] rejects reparenting that would create a cycle or a
//!   self-reference.
//! - [`deletion_guard`] rejects deleting a location that still has child
//!   locations or boxes. Deletion never cascades.
//! - [`path`] walks ancestors for breadcrumbs and descendants for
//!   move-target exclusion.
//! - [`listing`] builds the name-sorted, depth-annotated display order.
//! - [`HierarchyManager`] validates commands and runs guards and mutation in
//!   one [`LocationStore`] unit of work.

pub mod command;
pub mod cycle_guard;
pub mod deletion_guard;
pub mod forest;
pub mod listing;
pub mod location;
pub mod manager;
pub mod memory;
pub mod path;
pub mod store;

pub use command::{CreateLocation, UpdateLocation};
pub use forest::Forest;
pub use location::{HierarchyEntry, Location, LocationDetails, LocationRef, LocationView};
pub use manager::HierarchyManager;
pub use memory::InMemoryLocationStore;
pub use store::{LocationStore, LocationTx};
