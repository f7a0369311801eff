//! Translation of sqlx errors into domain errors.

use homestock_core::error::CoreError;

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL `check_violation`.
const CHECK_VIOLATION: &str = "23514";

/// Classify a sqlx error as a [`CoreError`].
///
/// - Unique, foreign-key and check violations map to `Conflict`, naming the
///   constraint.
/// - Everything else maps to `Internal` and is logged; the detail never
///   reaches the client.
pub fn to_core_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        let constraint = db_err.constraint().unwrap_or("unknown");
        match code.as_deref() {
            Some(UNIQUE_VIOLATION) => {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return CoreError::Conflict(format!(
                    "Operation violates reference constraint: {constraint}"
                ));
            }
            Some(CHECK_VIOLATION) => {
                return CoreError::Conflict(format!(
                    "Operation violates check constraint: {constraint}"
                ));
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}
