//! Integration Tests for API Endpoints
//!
//! Drives the full request/response cycle through the router: the
//! cache-aside read path, invalidate-on-write, statistics, and error
//! mapping.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use cache_aside::api::create_router;
use cache_aside::backing::SimulatedBackingStore;
use cache_aside::cache::MemoryCache;
use cache_aside::error::BackingStoreError;
use cache_aside::store::BackingStore;
use cache_aside::{AppState, CacheAsideStore};

// == Helper Functions ==

fn create_test_app() -> Router {
    create_test_app_with_ttl(Duration::from_secs(30))
}

fn create_test_app_with_ttl(ttl: Duration) -> Router {
    let cache = Arc::new(MemoryCache::new());
    let backing = Arc::new(SimulatedBackingStore::new(Duration::ZERO));
    let store = CacheAsideStore::new(cache, backing, ttl);
    create_router(AppState::new(store))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Backing store double that is permanently unavailable.
struct UnavailableBackingStore;

#[async_trait]
impl BackingStore for UnavailableBackingStore {
    async fn fetch(&self, _id: &str) -> Result<String, BackingStoreError> {
        Err(BackingStoreError::Unavailable(
            "connection refused".to_string(),
        ))
    }

    async fn write(&self, _id: &str, _value: &str) -> Result<(), BackingStoreError> {
        Err(BackingStoreError::Unavailable(
            "connection refused".to_string(),
        ))
    }
}

fn create_unavailable_app() -> Router {
    let cache = Arc::new(MemoryCache::new());
    let store = CacheAsideStore::new(
        cache,
        Arc::new(UnavailableBackingStore),
        Duration::from_secs(30),
    );
    create_router(AppState::new(store))
}

// == Read Path Tests ==

#[tokio::test]
async fn test_get_endpoint_miss_then_hit() {
    let app = create_test_app();

    // First read falls through to the backing store
    let first_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(first_response.status(), StatusCode::OK);
    let first = body_to_json(first_response.into_body()).await;
    assert_eq!(first["id"].as_str().unwrap(), "42");
    assert_eq!(first["source"].as_str().unwrap(), "STORE");
    assert!(first["value"].as_str().unwrap().starts_with("value-from-db-"));

    // Second read within the TTL is served from the cache
    let second_response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(second_response.status(), StatusCode::OK);
    let second = body_to_json(second_response.into_body()).await;
    assert_eq!(second["source"].as_str().unwrap(), "CACHE");
    assert_eq!(second["value"], first["value"]);
}

#[tokio::test]
async fn test_get_endpoint_missing_id() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_endpoint_empty_id() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == Write Path Tests ==

#[tokio::test]
async fn test_update_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/data")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"id":"42","value":"newval"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"].as_str().unwrap(), "42");
    assert!(json["message"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn test_update_invalidates_cached_entry() {
    let app = create_test_app();

    // Populate the cache via a miss
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Verify the entry is cached
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let cached = body_to_json(response.into_body()).await;
    assert_eq!(cached["source"].as_str().unwrap(), "CACHE");

    // Update the record
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/data")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"id":"42","value":"newval"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The next read falls through to the backing store and sees the write
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let fresh = body_to_json(response.into_body()).await;
    assert_eq!(fresh["source"].as_str().unwrap(), "STORE");
    assert_eq!(fresh["value"].as_str().unwrap(), "newval");
}

#[tokio::test]
async fn test_update_endpoint_empty_id() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/data")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"id":"","value":"test"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/data")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum returns 422 for JSON parsing errors by default
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

// == Error Mapping Tests ==

#[tokio::test]
async fn test_backing_failure_on_get_maps_to_bad_gateway() {
    let app = create_unavailable_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_backing_failure_on_update_maps_to_bad_gateway() {
    let app = create_unavailable_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/data")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"id":"42","value":"newval"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    // Miss
    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=stats_id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Hit
    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=stats_id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Update (invalidation)
    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/data")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"id":"stats_id","value":"v"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Check stats
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["invalidations"].as_u64().unwrap(), 1);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == TTL Expiration via API Tests ==

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app_with_ttl(Duration::from_millis(100));

    // Populate the cache via a miss
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=ttl_test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let first = body_to_json(response.into_body()).await;
    assert_eq!(first["source"].as_str().unwrap(), "STORE");

    // Verify it is served from the cache before expiry
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=ttl_test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let cached = body_to_json(response.into_body()).await;
    assert_eq!(cached["source"].as_str().unwrap(), "CACHE");

    // Wait for the TTL to expire
    tokio::time::sleep(Duration::from_millis(150)).await;

    // The read falls through to the backing store again
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/data?id=ttl_test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let expired = body_to_json(response.into_body()).await;
    assert_eq!(expired["source"].as_str().unwrap(), "STORE");
}
