use std::fmt;

use crate::types::DbId;

/// The kind of dependent that blocks a location from being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependents {
    /// Other locations whose `parent_id` points at the location.
    ChildLocations,
    /// Boxes stored at the location.
    Boxes,
}

impl Dependents {
    /// Noun used in user-facing messages (`"child location(s)"`, `"box(es)"`).
    pub fn noun(self) -> &'static str {
        match self {
            Dependents::ChildLocations => "child location(s)",
            Dependents::Boxes => "box(es)",
        }
    }
}

impl fmt::Display for Dependents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Parent location not found")]
    InvalidParent { parent_id: DbId },

    #[error("Cannot create circular reference in location hierarchy")]
    CircularReference { location_id: DbId, parent_id: DbId },

    #[error("Cannot delete location with {count} {dependents}. Move or delete them first.")]
    HasDependents { dependents: Dependents, count: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_dependents_message_names_children() {
        let err = CoreError::HasDependents {
            dependents: Dependents::ChildLocations,
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete location with 2 child location(s). Move or delete them first."
        );
    }

    #[test]
    fn has_dependents_message_names_boxes() {
        let err = CoreError::HasDependents {
            dependents: Dependents::Boxes,
            count: 1,
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete location with 1 box(es). Move or delete them first."
        );
    }

    #[test]
    fn not_found_message_uses_entity_name() {
        let err = CoreError::NotFound {
            entity: "Location",
            id: 7,
        };
        assert_eq!(err.to_string(), "Location not found");
    }
}
