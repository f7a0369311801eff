//! Repository for the `locations` table and the counts that guard it.

use homestock_core::hierarchy::{CreateLocation, UpdateLocation};
use homestock_core::types::DbId;
use sqlx::PgConnection;

use crate::models::location::LocationRow;

/// Column list for locations queries.
const COLUMNS: &str = "id, name, description, parent_id, created_at, updated_at";

/// Advisory lock key that serializes structural changes to the hierarchy
/// (ASCII "LOCATION").
pub const HIERARCHY_LOCK_KEY: i64 = 0x4C4F_4341_5449_4F4E;

/// Provides queries for storage locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Take the transaction-scoped hierarchy lock. Released on commit or
    /// rollback.
    pub async fn lock_hierarchy(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(HIERARCHY_LOCK_KEY)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Insert a new location, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateLocation,
    ) -> Result<LocationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, description, parent_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LocationRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.parent_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a location by its primary key.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<LocationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, LocationRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List every location. Ordering is applied by the caller.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<LocationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations");
        sqlx::query_as::<_, LocationRow>(&query)
            .fetch_all(&mut *conn)
            .await
    }

    /// Update a location. Returns the updated row, or `None` if not found.
    ///
    /// `name` uses `COALESCE`; `description` and `parent_id` are nullable so
    /// a provided-flag decides whether the (possibly null) value is applied.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<LocationRow>, sqlx::Error> {
        let description_provided = input.description.is_some();
        let description = input.description.as_ref().and_then(|d| d.as_deref());
        let parent_provided = input.parent_id.is_some();
        let parent_id = input.parent_id.flatten();

        let query = format!(
            "UPDATE locations SET
                name        = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                parent_id   = CASE WHEN $5 THEN $6 ELSE parent_id END,
                updated_at  = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LocationRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(description_provided)
            .bind(description)
            .bind(parent_provided)
            .bind(parent_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a location by ID.
    ///
    /// Returns `true` if a row was deleted, `false` if not found. The caller
    /// must have checked for children and boxes first; the schema rejects the
    /// delete otherwise.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count direct child locations.
    pub async fn count_children(
        conn: &mut PgConnection,
        parent_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM locations WHERE parent_id = $1")
            .bind(parent_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row.0)
    }

    /// Count boxes stored directly at a location.
    pub async fn count_boxes(
        conn: &mut PgConnection,
        location_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boxes WHERE location_id = $1")
            .bind(location_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row.0)
    }

    /// Count items inside boxes stored directly at a location.
    pub async fn count_items(
        conn: &mut PgConnection,
        location_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM items i
             JOIN boxes b ON b.id = i.box_id
             WHERE b.location_id = $1",
        )
        .bind(location_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row.0)
    }
}
