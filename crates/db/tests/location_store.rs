//! Integration tests for the PostgreSQL location store.
//!
//! Exercises `LocationRepo` and `PgLocationStore` against a real database,
//! including the schema constraints that back the hierarchy invariants.
//! Requires `DATABASE_URL`; run with `cargo test -- --ignored`.

use std::sync::Arc;

use assert_matches::assert_matches;
use homestock_core::error::{CoreError, Dependents};
use homestock_core::hierarchy::{
    CreateLocation, HierarchyManager, LocationStore, UpdateLocation,
};
use homestock_core::types::DbId;
use homestock_db::repositories::LocationRepo;
use homestock_db::PgLocationStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn named(name: &str, parent_id: Option<DbId>) -> CreateLocation {
    CreateLocation {
        name: name.to_string(),
        description: None,
        parent_id,
    }
}

fn manager(pool: PgPool) -> HierarchyManager {
    HierarchyManager::new(Arc::new(PgLocationStore::new(pool)))
}

async fn insert_box(pool: &PgPool, location_id: DbId, items: usize) -> DbId {
    let (box_id,): (DbId,) =
        sqlx::query_as("INSERT INTO boxes (name, location_id) VALUES ('Box', $1) RETURNING id")
            .bind(location_id)
            .fetch_one(pool)
            .await
            .unwrap();
    for n in 0..items {
        sqlx::query("INSERT INTO items (name, box_id) VALUES ($1, $2)")
            .bind(format!("Item {n}"))
            .bind(box_id)
            .execute(pool)
            .await
            .unwrap();
    }
    box_id
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let house = LocationRepo::create(&mut conn, &named("House", None))
        .await
        .unwrap();
    let found = LocationRepo::find_by_id(&mut conn, house.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "House");
    assert_eq!(found.parent_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_distinguishes_absent_and_null(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let house = LocationRepo::create(&mut conn, &named("House", None))
        .await
        .unwrap();
    let garage = LocationRepo::create(
        &mut conn,
        &CreateLocation {
            name: "Garage".into(),
            description: Some("Detached".into()),
            parent_id: Some(house.id),
        },
    )
    .await
    .unwrap();

    let renamed = LocationRepo::update(
        &mut conn,
        garage.id,
        &UpdateLocation {
            name: Some("Carport".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.parent_id, Some(house.id));
    assert_eq!(renamed.description.as_deref(), Some("Detached"));

    let detached = LocationRepo::update(
        &mut conn,
        garage.id,
        &UpdateLocation {
            description: Some(None),
            parent_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(detached.parent_id, None);
    assert_eq!(detached.description, None);
    assert_eq!(detached.name, "Carport");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_counts(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let house = LocationRepo::create(&mut conn, &named("House", None))
        .await
        .unwrap();
    LocationRepo::create(&mut conn, &named("Garage", Some(house.id)))
        .await
        .unwrap();
    drop(conn);
    insert_box(&pool, house.id, 3).await;
    insert_box(&pool, house.id, 1).await;

    let mut conn = pool.acquire().await.unwrap();
    assert_eq!(LocationRepo::count_children(&mut conn, house.id).await.unwrap(), 1);
    assert_eq!(LocationRepo::count_boxes(&mut conn, house.id).await.unwrap(), 2);
    assert_eq!(LocationRepo::count_items(&mut conn, house.id).await.unwrap(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_schema_rejects_self_parent(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let house = LocationRepo::create(&mut conn, &named("House", None))
        .await
        .unwrap();
    let result = LocationRepo::update(
        &mut conn,
        house.id,
        &UpdateLocation {
            parent_id: Some(Some(house.id)),
            ..Default::default()
        },
    )
    .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_schema_restricts_delete_of_referenced_location(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let house = LocationRepo::create(&mut conn, &named("House", None))
        .await
        .unwrap();
    drop(conn);
    insert_box(&pool, house.id, 0).await;

    let mut conn = pool.acquire().await.unwrap();
    let err = LocationRepo::delete(&mut conn, house.id).await.unwrap_err();
    assert_matches!(
        homestock_db::error::to_core_error(err),
        CoreError::Conflict(_)
    );
}

// ---------------------------------------------------------------------------
// Store + manager
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_uncommitted_write_is_rolled_back(pool: PgPool) {
    let store = PgLocationStore::new(pool.clone());
    {
        let mut tx = store.write().await.unwrap();
        tx.create(&named("Ghost", None)).await.unwrap();
    }
    let mut tx = store.read().await.unwrap();
    assert!(tx.list().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_house_garage_shelf_scenario(pool: PgPool) {
    let m = manager(pool.clone());

    let house = m.create_location(named("House", None)).await.unwrap();
    let garage = m
        .create_location(named("Garage", Some(house.id)))
        .await
        .unwrap();
    assert_eq!(
        m.breadcrumb(garage.id).await.unwrap(),
        vec!["House", "Garage"]
    );

    let result = m
        .update_location(
            house.id,
            UpdateLocation {
                parent_id: Some(Some(garage.id)),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(result, Err(CoreError::CircularReference { .. }));

    let shelf = m
        .create_location(named("Shelf", Some(garage.id)))
        .await
        .unwrap();
    assert_matches!(
        m.delete_location(garage.id).await,
        Err(CoreError::HasDependents {
            dependents: Dependents::ChildLocations,
            count: 1
        })
    );

    m.delete_location(shelf.id).await.unwrap();
    m.delete_location(garage.id).await.unwrap();
    let names: Vec<String> = m
        .list_hierarchy()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.location.name)
        .collect();
    assert_eq!(names, vec!["House"]);

    insert_box(&pool, house.id, 0).await;
    assert_matches!(
        m.delete_location(house.id).await,
        Err(CoreError::HasDependents {
            dependents: Dependents::Boxes,
            count: 1
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_crossing_reparents(pool: PgPool) {
    let m = manager(pool);
    let a = m.create_location(named("A", None)).await.unwrap();
    let b = m.create_location(named("B", None)).await.unwrap();

    let m1 = m.clone();
    let m2 = m.clone();
    let first = tokio::spawn(async move {
        m1.update_location(
            a.id,
            UpdateLocation {
                parent_id: Some(Some(b.id)),
                ..Default::default()
            },
        )
        .await
    });
    let second = tokio::spawn(async move {
        m2.update_location(
            b.id,
            UpdateLocation {
                parent_id: Some(Some(a.id)),
                ..Default::default()
            },
        )
        .await
    });

    let first = first.await.unwrap();
    let second = second.await.unwrap();
    assert!(first.is_ok() ^ second.is_ok());
    assert_eq!(m.list_hierarchy().await.unwrap().len(), 2);
}
