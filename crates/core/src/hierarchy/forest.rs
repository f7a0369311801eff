//! Flat adjacency view of every location, keyed by id.
//!
//! Built fresh from a store listing for each request; never cached across
//! requests. The ancestor and descendant walks in `path` and `listing`
//! operate on this structure.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::hierarchy::location::{Location, LocationRef, LocationView};
use crate::types::DbId;

#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: HashMap<DbId, Location>,
    /// Child ids per parent (`None` = top level), sorted by [`compare_names`].
    children: HashMap<Option<DbId>, Vec<DbId>>,
}

impl Forest {
    pub fn new(locations: Vec<Location>) -> Self {
        let nodes: HashMap<DbId, Location> =
            locations.into_iter().map(|l| (l.id, l)).collect();

        let mut children: HashMap<Option<DbId>, Vec<DbId>> = HashMap::new();
        for location in nodes.values() {
            children
                .entry(location.parent_id)
                .or_default()
                .push(location.id);
        }
        for ids in children.values_mut() {
            ids.sort_by(|a, b| compare_names(&nodes[a], &nodes[b]));
        }

        Self { nodes, children }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: DbId) -> Option<&Location> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Parent of `id`. `None` for top-level locations and unknown ids.
    pub fn parent_of(&self, id: DbId) -> Option<DbId> {
        self.nodes.get(&id).and_then(|l| l.parent_id)
    }

    /// Direct children of `parent` (`None` = top level), sorted by name.
    pub fn children_of(&self, parent: Option<DbId>) -> impl Iterator<Item = &Location> + '_ {
        self.children
            .get(&parent)
            .into_iter()
            .flatten()
            .filter_map(|id| self.nodes.get(id))
    }

    /// Every location sorted by name.
    pub fn sorted(&self) -> Vec<&Location> {
        let mut all: Vec<&Location> = self.nodes.values().collect();
        all.sort_by(|a, b| compare_names(a, b));
        all
    }

    /// The location with its parent and children references.
    pub fn view(&self, id: DbId) -> Option<LocationView> {
        let location = self.nodes.get(&id)?;
        let parent = location
            .parent_id
            .and_then(|pid| self.nodes.get(&pid))
            .map(LocationRef::from);
        let children = self.children_of(Some(id)).map(LocationRef::from).collect();
        Some(LocationView {
            location: location.clone(),
            parent,
            children,
        })
    }
}

/// Display ordering: case-insensitive name, then exact name, then id so the
/// order is total and stable across calls.
pub fn compare_names(a: &Location, b: &Location) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
