//! Handlers for the `/locations` resource.

use axum::extract::State;
use axum::Json;
use homestock_core::hierarchy::{
    CreateLocation, HierarchyEntry, Location, LocationDetails, LocationView, UpdateLocation,
};
use homestock_core::hierarchy::path::display_path;
use homestock_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::{BreadcrumbResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/locations
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<LocationView>>> {
    let locations = state.hierarchy.list_locations().await?;
    Ok(Json(locations))
}

/// GET /api/locations/hierarchy
pub async fn hierarchy(State(state): State<AppState>) -> AppResult<Json<Vec<HierarchyEntry>>> {
    let entries = state.hierarchy.list_hierarchy().await?;
    Ok(Json(entries))
}

/// POST /api/locations
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateLocation>,
) -> AppResult<Json<Location>> {
    let location = state.hierarchy.create_location(input).await?;
    Ok(Json(location))
}

/// GET /api/locations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<LocationDetails>> {
    let details = state.hierarchy.location_details(id).await?;
    Ok(Json(details))
}

/// PUT /api/locations/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateLocation>,
) -> AppResult<Json<Location>> {
    let location = state.hierarchy.update_location(id, input).await?;
    Ok(Json(location))
}

/// DELETE /api/locations/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.hierarchy.delete_location(id).await?;
    Ok(Json(MessageResponse {
        message: "Location deleted successfully",
    }))
}

/// GET /api/locations/{id}/breadcrumb
pub async fn breadcrumb(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<BreadcrumbResponse>> {
    let breadcrumb = state.hierarchy.breadcrumb(id).await?;
    Ok(Json(BreadcrumbResponse {
        path: display_path(&breadcrumb),
        breadcrumb,
    }))
}

/// GET /api/locations/{id}/move-targets
pub async fn move_targets(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Vec<HierarchyEntry>>> {
    let targets = state.hierarchy.move_targets(id).await?;
    Ok(Json(targets))
}
