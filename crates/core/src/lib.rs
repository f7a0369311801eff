//! Domain layer for the home inventory location hierarchy.
//!
//! Holds the shared error and id types plus the [`hierarchy`] module, which
//! owns every rule about how locations may be nested, moved and removed.
//! Nothing in this crate talks to a database directly; persistence goes
//! through the [`hierarchy::LocationStore`] trait.

pub mod error;
pub mod hierarchy;
pub mod types;
