//! Integration tests for the introspection endpoints.
//!
//! Tests verify:
//! - Service descriptor fields and live zoom-level enumeration
//! - Health check shape and non-decreasing uptime
//! - Tiles-info structure, non-numeric exclusion, and sorted levels

use axum::http::StatusCode;

use super::test_utils::{body_json, TestServer, TRANSPARENT_PNG};

// =============================================================================
// Service Info
// =============================================================================

#[tokio::test]
async fn test_service_info() {
    let server = TestServer::new();
    server.create_level_dir("17");
    server.create_level_dir("18");
    server.create_level_dir("20");

    let response = server.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let info = body_json(response).await;
    assert_eq!(info["name"], "tile-depot");
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(info["usage"], "/{z}/{x}/{y}.{format}");
    assert_eq!(
        info["available_levels"],
        serde_json::json!([17, 18, 20])
    );
}

#[tokio::test]
async fn test_service_info_empty_tiles_root() {
    let server = TestServer::new();

    let response = server.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let info = body_json(response).await;
    assert_eq!(info["available_levels"], serde_json::json!([]));
}

#[tokio::test]
async fn test_service_info_reflects_new_levels() {
    let server = TestServer::new();

    let info = body_json(server.get("/").await).await;
    assert_eq!(info["available_levels"], serde_json::json!([]));

    // A level added after startup is visible on the next request; nothing
    // is cached between requests
    server.create_level_dir("4");
    let info = body_json(server.get("/").await).await;
    assert_eq!(info["available_levels"], serde_json::json!([4]));
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = TestServer::new();

    let response = server.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert!(health["uptime"].as_f64().unwrap() >= 0.0);

    // Timestamp is RFC 3339
    let timestamp = health["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_health_uptime_non_decreasing() {
    let server = TestServer::new();

    let first = body_json(server.get("/health").await).await;
    let second = body_json(server.get("/health").await).await;

    let first_uptime = first["uptime"].as_f64().unwrap();
    let second_uptime = second["uptime"].as_f64().unwrap();
    assert!(second_uptime >= first_uptime);
}

// =============================================================================
// Tiles Info
// =============================================================================

#[tokio::test]
async fn test_tiles_info_excludes_non_numeric_levels() {
    let server = TestServer::new();
    server.create_level_dir("17");
    server.create_level_dir("18");
    server.create_level_dir("abc");
    server.create_level_dir("20");

    let response = server.get("/tiles-info").await;
    assert_eq!(response.status(), StatusCode::OK);

    let info = body_json(response).await;
    assert_eq!(
        info["available_levels"],
        serde_json::json!([17, 18, 20])
    );
    assert!(info["structure"].get("abc").is_none());
}

#[tokio::test]
async fn test_tiles_info_structure() {
    let server = TestServer::new();
    server.write_tile("18", "131072", "131072.png", TRANSPARENT_PNG);
    server.write_tile("18", "131073", "131072.png", TRANSPARENT_PNG);

    let info = body_json(server.get("/tiles-info").await).await;

    let level = &info["structure"]["18"];
    assert_eq!(level["x_directories"], 2);
    assert_eq!(
        level["sample_x_dirs"],
        serde_json::json!(["131072", "131073"])
    );
}

#[tokio::test]
async fn test_tiles_info_reports_absolute_directory() {
    let server = TestServer::new();

    let info = body_json(server.get("/tiles-info").await).await;
    let tiles_directory = info["tiles_directory"].as_str().unwrap();
    assert!(std::path::Path::new(tiles_directory).is_absolute());
}

#[tokio::test]
async fn test_tiles_info_empty_root() {
    let server = TestServer::new();

    let info = body_json(server.get("/tiles-info").await).await;
    assert_eq!(info["available_levels"], serde_json::json!([]));
    assert_eq!(info["structure"], serde_json::json!({}));
}
