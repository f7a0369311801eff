#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use homestock_core::hierarchy::{HierarchyManager, InMemoryLocationStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

use homestock_api::config::{LogFormat, ServerConfig};
use homestock_api::router::build_app_router;
use homestock_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. The database URL is never dialled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        request_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The store handle is returned so tests can place boxes directly.
pub fn build_test_app() -> (Router, InMemoryLocationStore) {
    let store = InMemoryLocationStore::new();
    let config = test_config();
    let state = AppState {
        hierarchy: HierarchyManager::new(Arc::new(store.clone())),
    };
    (build_app_router(state, &config), store)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a location through the API and return its id.
pub async fn create_location(app: &Router, name: &str, parent_id: Option<i64>) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/locations",
        serde_json::json!({ "name": name, "parentId": parent_id }),
    )
    .await;
    assert_eq!(response.status(), 200, "creating {name}");
    body_json(response).await["id"].as_i64().unwrap()
}
