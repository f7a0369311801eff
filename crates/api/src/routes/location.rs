//! Route definitions for the `/locations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create
/// GET    /hierarchy              -> hierarchy
/// GET    /{id}                   -> get_by_id
/// PUT    /{id}                   -> update
/// DELETE /{id}                   -> delete
/// GET    /{id}/breadcrumb        -> breadcrumb
/// GET    /{id}/move-targets      -> move_targets
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(location::list).post(location::create))
        .route("/hierarchy", get(location::hierarchy))
        .route(
            "/{id}",
            get(location::get_by_id)
                .put(location::update)
                .delete(location::delete),
        )
        .route("/{id}/breadcrumb", get(location::breadcrumb))
        .route("/{id}/move-targets", get(location::move_targets))
}
