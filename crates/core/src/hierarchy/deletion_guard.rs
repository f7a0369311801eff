//! Referential-integrity check run before a location is deleted.

use crate::error::{CoreError, Dependents};
use crate::hierarchy::store::LocationTx;
use crate::types::DbId;

/// Outcome of [`can_delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionCheck {
    Clear,
    Blocked { dependents: Dependents, count: i64 },
}

impl DeletionCheck {
    pub fn into_result(self) -> Result<(), CoreError> {
        match self {
            DeletionCheck::Clear => Ok(()),
            DeletionCheck::Blocked { dependents, count } => {
                Err(CoreError::HasDependents { dependents, count })
            }
        }
    }
}

/// Decide whether `location_id` can be deleted.
///
/// Both counts are always queried. Child locations take precedence over
/// boxes, and only one obstruction is reported per call.
pub async fn can_delete(
    tx: &mut dyn LocationTx,
    location_id: DbId,
) -> Result<DeletionCheck, CoreError> {
    let child_count = tx.count_children(location_id).await?;
    let box_count = tx.count_boxes(location_id).await?;
    tracing::debug!(location_id, child_count, box_count, "Checked location dependents");

    let check = if child_count > 0 {
        DeletionCheck::Blocked {
            dependents: Dependents::ChildLocations,
            count: child_count,
        }
    } else if box_count > 0 {
        DeletionCheck::Blocked {
            dependents: Dependents::Boxes,
            count: box_count,
        }
    } else {
        DeletionCheck::Clear
    };
    Ok(check)
}
