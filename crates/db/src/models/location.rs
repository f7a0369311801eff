//! Row model for the `locations` table.

use homestock_core::hierarchy::Location;
use homestock_core::types::{DbId, Timestamp};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            parent_id: row.parent_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
