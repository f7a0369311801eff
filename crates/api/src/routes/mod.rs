pub mod health;
pub mod location;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /locations                                       list, create
/// /locations/hierarchy                             depth-first listing
/// /locations/{id}                                  get, update, delete
/// /locations/{id}/breadcrumb                       ancestor names
/// /locations/{id}/move-targets                     valid reparent targets
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/locations", location::router())
}
