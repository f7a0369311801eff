//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&mut PgConnection` as the first argument, so the same query
//! can run on a pooled connection or inside a transaction.

pub mod location_repo;

pub use location_repo::LocationRepo;
