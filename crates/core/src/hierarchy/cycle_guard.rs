//! Cycle detection for reparenting.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::hierarchy::store::LocationTx;
use crate::types::DbId;

/// Whether making `candidate_parent_id` the parent of `location_id` would
/// break the forest invariant.
///
/// Walks upward from the candidate parent one `get` at a time inside the
/// caller's unit of work, so only the candidate's ancestor chain is read.
/// Hitting `location_id` means the candidate is a descendant (or the node
/// itself). Revisiting any node means the stored data already contains a
/// cycle, which is also reported as a would-be cycle. Detaching to the top
/// level (`None`) is always safe.
pub async fn would_create_cycle(
    tx: &mut dyn LocationTx,
    location_id: DbId,
    candidate_parent_id: Option<DbId>,
) -> Result<bool, CoreError> {
    let Some(candidate) = candidate_parent_id else {
        return Ok(false);
    };
    if candidate == location_id {
        return Ok(true);
    }

    let mut visited = HashSet::new();
    let mut current = Some(candidate);
    while let Some(node) = current {
        if node == location_id {
            return Ok(true);
        }
        if !visited.insert(node) {
            tracing::warn!(
                location_id = node,
                "Existing cycle found in location hierarchy"
            );
            return Ok(true);
        }
        current = tx.get(node).await?.and_then(|location| location.parent_id);
    }
    Ok(false)
}
