//! PostgreSQL implementation of the core location store.
//!
//! Each unit of work is one database transaction. Write units take the
//! hierarchy advisory lock first, so concurrent reparents and deletions
//! validate and commit one at a time against the latest committed data.

use async_trait::async_trait;
use homestock_core::error::CoreError;
use homestock_core::hierarchy::{
    CreateLocation, Location, LocationStore, LocationTx, UpdateLocation,
};
use homestock_core::types::DbId;
use sqlx::{Postgres, Transaction};

use crate::error::to_core_error;
use crate::repositories::LocationRepo;
use crate::DbPool;

/// [`LocationStore`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgLocationStore {
    pool: DbPool,
}

impl PgLocationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl LocationStore for PgLocationStore {
    async fn read(&self) -> Result<Box<dyn LocationTx>, CoreError> {
        let tx = self.pool.begin().await.map_err(to_core_error)?;
        Ok(Box::new(PgLocationTx { tx }))
    }

    async fn write(&self) -> Result<Box<dyn LocationTx>, CoreError> {
        let mut tx = self.pool.begin().await.map_err(to_core_error)?;
        LocationRepo::lock_hierarchy(&mut tx)
            .await
            .map_err(to_core_error)?;
        Ok(Box::new(PgLocationTx { tx }))
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(to_core_error)
    }
}

/// One transaction. Dropped without commit, sqlx rolls it back.
struct PgLocationTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LocationTx for PgLocationTx {
    async fn get(&mut self, id: DbId) -> Result<Option<Location>, CoreError> {
        let row = LocationRepo::find_by_id(&mut self.tx, id)
            .await
            .map_err(to_core_error)?;
        Ok(row.map(Location::from))
    }

    async fn list(&mut self) -> Result<Vec<Location>, CoreError> {
        let rows = LocationRepo::list(&mut self.tx)
            .await
            .map_err(to_core_error)?;
        Ok(rows.into_iter().map(Location::from).collect())
    }

    async fn create(&mut self, input: &CreateLocation) -> Result<Location, CoreError> {
        let row = LocationRepo::create(&mut self.tx, input)
            .await
            .map_err(to_core_error)?;
        Ok(row.into())
    }

    async fn update(
        &mut self,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, CoreError> {
        let row = LocationRepo::update(&mut self.tx, id, input)
            .await
            .map_err(to_core_error)?;
        Ok(row.map(Location::from))
    }

    async fn delete(&mut self, id: DbId) -> Result<bool, CoreError> {
        LocationRepo::delete(&mut self.tx, id)
            .await
            .map_err(to_core_error)
    }

    async fn count_children(&mut self, parent_id: DbId) -> Result<i64, CoreError> {
        LocationRepo::count_children(&mut self.tx, parent_id)
            .await
            .map_err(to_core_error)
    }

    async fn count_boxes(&mut self, location_id: DbId) -> Result<i64, CoreError> {
        LocationRepo::count_boxes(&mut self.tx, location_id)
            .await
            .map_err(to_core_error)
    }

    async fn count_items(&mut self, location_id: DbId) -> Result<i64, CoreError> {
        LocationRepo::count_items(&mut self.tx, location_id)
            .await
            .map_err(to_core_error)
    }

    async fn commit(self: Box<Self>) -> Result<(), CoreError> {
        self.tx.commit().await.map_err(to_core_error)
    }
}
