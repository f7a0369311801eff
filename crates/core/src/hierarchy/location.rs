//! Location entity and the read-side projections built from it.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// A storage location. Top-level locations have no `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal `{id, name}` reference used for parents and children in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRef {
    pub id: DbId,
    pub name: String,
}

impl From<&Location> for LocationRef {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
        }
    }
}

/// A location together with its direct parent and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationView {
    #[serde(flatten)]
    pub location: Location,
    pub parent: Option<LocationRef>,
    pub children: Vec<LocationRef>,
}

/// One row of the depth-first hierarchy listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyEntry {
    #[serde(flatten)]
    pub location: Location,
    /// Zero for top-level locations.
    pub depth: usize,
}

/// Full detail view of a single location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetails {
    #[serde(flatten)]
    pub view: LocationView,
    pub breadcrumb: Vec<String>,
    pub path: String,
    pub box_count: i64,
    pub item_count: i64,
}
