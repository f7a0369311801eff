//! Validated command objects for location mutations.
//!
//! Request bodies deserialize straight into these types (camelCase on the
//! wire). Validation runs before any store access.

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum allowed length for a location name, in characters.
pub const MAX_LOCATION_NAME_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Input for creating a new location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<DbId>,
}

impl CreateLocation {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_location_name(&self.name)
    }
}

/// Input for updating a location. Absent fields are left unchanged.
///
/// `description` and `parent_id` distinguish "not provided" (`None`) from
/// "explicitly set to null" (`Some(None)`), so a location can be detached to
/// the top level or have its description cleared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<DbId>>,
}

impl UpdateLocation {
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.name {
            Some(name) => validate_location_name(name),
            None => Ok(()),
        }
    }

    /// The requested new parent, if the payload carried a non-null `parentId`.
    pub fn new_parent_id(&self) -> Option<DbId> {
        self.parent_id.flatten()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a location name: must contain a non-whitespace character and be
/// within [`MAX_LOCATION_NAME_LENGTH`] characters.
pub fn validate_location_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Location name must not be empty".to_string(),
        ));
    }
    let length = name.chars().count();
    if length > MAX_LOCATION_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Location name must not exceed {MAX_LOCATION_NAME_LENGTH} characters, got {length}"
        )));
    }
    Ok(())
}

/// Deserialize a present field as `Some(value)` where `value` may be null.
///
/// Combined with `#[serde(default)]`, a missing field stays `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
