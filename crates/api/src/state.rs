use homestock_core::hierarchy::HierarchyManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable; the manager holds its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Location hierarchy operations over the configured store.
    pub hierarchy: HierarchyManager,
}
