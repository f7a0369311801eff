//! Response bodies that are not plain domain types.

use serde::Serialize;

/// `{ "message": ... }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Breadcrumb for a single location.
#[derive(Debug, Serialize)]
pub struct BreadcrumbResponse {
    /// Names from the top-level ancestor down to the location.
    pub breadcrumb: Vec<String>,
    /// The breadcrumb joined for display, e.g. `"House > Garage"`.
    pub path: String,
}
