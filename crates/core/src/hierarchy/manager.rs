//! Orchestration of location mutations and hierarchy reads.

use std::sync::Arc;

use crate::error::CoreError;
use crate::hierarchy::command::{CreateLocation, UpdateLocation};
use crate::hierarchy::forest::Forest;
use crate::hierarchy::location::{HierarchyEntry, Location, LocationDetails, LocationView};
use crate::hierarchy::store::{LocationStore, LocationTx};
use crate::hierarchy::{cycle_guard, deletion_guard, listing, path};
use crate::types::DbId;

const ENTITY: &str = "Location";

/// Entry point for every hierarchy operation.
///
/// Mutations validate their command first, then open a single write unit of
/// work in which the guards and the store mutation both run. Nothing is
/// committed unless every check passes.
#[derive(Clone)]
pub struct HierarchyManager {
    store: Arc<dyn LocationStore>,
}

impl HierarchyManager {
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn LocationStore> {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a location, optionally under an existing parent.
    ///
    /// A brand-new node cannot be its own ancestor, so no cycle check runs.
    pub async fn create_location(&self, input: CreateLocation) -> Result<Location, CoreError> {
        input.validate()?;

        let mut tx = self.store.write().await?;
        if let Some(parent_id) = input.parent_id {
            require_parent(tx.as_mut(), parent_id).await?;
        }
        let location = tx.create(&input).await?;
        tx.commit().await?;

        tracing::info!(
            location_id = location.id,
            parent_id = ?location.parent_id,
            "Location created"
        );
        Ok(location)
    }

    /// Update name, description and/or parent of a location.
    ///
    /// When `parent_id` is present and non-null the parent must exist and
    /// must not be the location itself or one of its descendants.
    pub async fn update_location(
        &self,
        id: DbId,
        input: UpdateLocation,
    ) -> Result<Location, CoreError> {
        input.validate()?;

        let mut tx = self.store.write().await?;
        require_location(tx.as_mut(), id).await?;

        if let Some(parent_id) = input.new_parent_id() {
            require_parent(tx.as_mut(), parent_id).await?;
            if cycle_guard::would_create_cycle(tx.as_mut(), id, Some(parent_id)).await? {
                tracing::warn!(location_id = id, parent_id, "Rejected circular reparent");
                return Err(CoreError::CircularReference {
                    location_id: id,
                    parent_id,
                });
            }
        }

        let location = tx
            .update(id, &input)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        tx.commit().await?;

        tracing::info!(
            location_id = id,
            parent_id = ?location.parent_id,
            reparented = input.parent_id.is_some(),
            "Location updated"
        );
        Ok(location)
    }

    /// Delete a location that has no child locations and no boxes.
    pub async fn delete_location(&self, id: DbId) -> Result<(), CoreError> {
        let mut tx = self.store.write().await?;
        require_location(tx.as_mut(), id).await?;

        let check = deletion_guard::can_delete(tx.as_mut(), id).await?;
        if let Err(err) = check.into_result() {
            tracing::warn!(location_id = id, error = %err, "Rejected location deletion");
            return Err(err);
        }

        if !tx.delete(id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id });
        }
        tx.commit().await?;

        tracing::info!(location_id = id, "Location deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn get_location(&self, id: DbId) -> Result<Location, CoreError> {
        let mut tx = self.store.read().await?;
        let location = require_location(tx.as_mut(), id).await?;
        tx.commit().await?;
        Ok(location)
    }

    /// Every location with parent and children references, ordered by name.
    pub async fn list_locations(&self) -> Result<Vec<LocationView>, CoreError> {
        let forest = self.load_forest().await?;
        Ok(listing::views(&forest))
    }

    /// Depth-first listing with a depth annotation for indentation.
    pub async fn list_hierarchy(&self) -> Result<Vec<HierarchyEntry>, CoreError> {
        let forest = self.load_forest().await?;
        Ok(listing::hierarchy(&forest))
    }

    /// Names from the top-level ancestor down to the location.
    pub async fn breadcrumb(&self, id: DbId) -> Result<Vec<String>, CoreError> {
        let forest = self.load_forest().await?;
        path::breadcrumb(&forest, id).ok_or(CoreError::NotFound { entity: ENTITY, id })
    }

    /// Locations `id` could be moved under, in hierarchy order.
    pub async fn move_targets(&self, id: DbId) -> Result<Vec<HierarchyEntry>, CoreError> {
        let forest = self.load_forest().await?;
        if !forest.contains(id) {
            return Err(CoreError::NotFound { entity: ENTITY, id });
        }
        Ok(listing::move_targets(&forest, id))
    }

    /// Detail view: relations, breadcrumb and derived box/item counts.
    pub async fn location_details(&self, id: DbId) -> Result<LocationDetails, CoreError> {
        let mut tx = self.store.read().await?;
        let forest = Forest::new(tx.list().await?);
        let view = forest
            .view(id)
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        let box_count = tx.count_boxes(id).await?;
        let item_count = tx.count_items(id).await?;
        tx.commit().await?;

        let breadcrumb = path::breadcrumb(&forest, id).unwrap_or_default();
        Ok(LocationDetails {
            view,
            path: path::display_path(&breadcrumb),
            breadcrumb,
            box_count,
            item_count,
        })
    }

    async fn load_forest(&self) -> Result<Forest, CoreError> {
        let mut tx = self.store.read().await?;
        let locations = tx.list().await?;
        tx.commit().await?;
        Ok(Forest::new(locations))
    }
}

async fn require_location(tx: &mut dyn LocationTx, id: DbId) -> Result<Location, CoreError> {
    tx.get(id)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })
}

async fn require_parent(tx: &mut dyn LocationTx, parent_id: DbId) -> Result<(), CoreError> {
    match tx.get(parent_id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::InvalidParent { parent_id }),
    }
}
