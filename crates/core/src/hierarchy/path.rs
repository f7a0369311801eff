//! Ancestor and descendant walks: breadcrumbs and move-target exclusion.

use std::collections::HashSet;

use crate::hierarchy::forest::Forest;
use crate::types::DbId;

/// Separator used when rendering a breadcrumb as a single string.
pub const PATH_SEPARATOR: &str = " > ";

/// Names from the top-level ancestor down to `location_id` itself.
///
/// Returns `None` if `location_id` is unknown. If the stored data contains a
/// cycle, the walk stops before the first repeated node.
pub fn breadcrumb(forest: &Forest, location_id: DbId) -> Option<Vec<String>> {
    forest.get(location_id)?;

    let mut names = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(location_id);
    while let Some(id) = current {
        if !visited.insert(id) {
            tracing::warn!(location_id, repeated = id, "Breadcrumb walk hit a cycle");
            break;
        }
        let Some(location) = forest.get(id) else {
            break;
        };
        names.push(location.name.clone());
        current = location.parent_id;
    }
    names.reverse();
    Some(names)
}

/// Render a breadcrumb for display, e.g. `"House > Garage > Shelf 2"`.
pub fn display_path(breadcrumb: &[String]) -> String {
    breadcrumb.join(PATH_SEPARATOR)
}

/// Every location below `location_id` (not including it).
pub fn descendants(forest: &Forest, location_id: DbId) -> HashSet<DbId> {
    let mut found = HashSet::new();
    let mut stack = vec![location_id];
    while let Some(id) = stack.pop() {
        for child in forest.children_of(Some(id)) {
            if child.id != location_id && found.insert(child.id) {
                stack.push(child.id);
            }
        }
    }
    found
}
