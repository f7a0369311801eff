//! Read-side projections of the hierarchy for display.

use std::collections::HashSet;

use crate::hierarchy::forest::Forest;
use crate::hierarchy::location::{HierarchyEntry, LocationView};
use crate::hierarchy::path;
use crate::types::DbId;

/// Depth-first, pre-order listing starting from the top-level locations,
/// siblings sorted by name.
///
/// Only locations reachable from a top-level location are listed, so nodes
/// caught in a corrupt cycle never appear.
pub fn hierarchy(forest: &Forest) -> Vec<HierarchyEntry> {
    let mut entries = Vec::with_capacity(forest.len());
    let mut visited = HashSet::new();

    // Push in reverse so the alphabetically first sibling is popped first.
    let mut stack: Vec<(DbId, usize)> = forest.children_of(None).map(|l| (l.id, 0)).collect();
    stack.reverse();

    while let Some((id, depth)) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(location) = forest.get(id) else {
            continue;
        };
        entries.push(HierarchyEntry {
            location: location.clone(),
            depth,
        });
        let mut children: Vec<(DbId, usize)> = forest
            .children_of(Some(id))
            .map(|child| (child.id, depth + 1))
            .collect();
        children.reverse();
        stack.extend(children);
    }
    entries
}

/// Hierarchy entries that `location_id` could be moved under: everything
/// except the location itself and its descendants.
pub fn move_targets(forest: &Forest, location_id: DbId) -> Vec<HierarchyEntry> {
    let mut excluded = path::descendants(forest, location_id);
    excluded.insert(location_id);
    hierarchy(forest)
        .into_iter()
        .filter(|entry| !excluded.contains(&entry.location.id))
        .collect()
}

/// Every location with parent and children references, ordered by name.
pub fn views(forest: &Forest) -> Vec<LocationView> {
    forest
        .sorted()
        .into_iter()
        .filter_map(|location| forest.view(location.id))
        .collect()
}
