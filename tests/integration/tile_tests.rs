//! Integration tests for tile retrieval and error handling.
//!
//! Tests verify:
//! - Tile retrieval with correct content-type and cache headers
//! - 404 body shape for missing tiles
//! - Rejection of malformed and traversal-shaped segments

use axum::http::StatusCode;

use tile_depot::RouterConfig;

use super::test_utils::{body_bytes, body_json, TestServer, TRANSPARENT_PNG};

// =============================================================================
// Basic Tile Retrieval
// =============================================================================

#[tokio::test]
async fn test_tile_retrieval_success() {
    let server = TestServer::new();
    server.write_tile("18", "131072", "131072.png", TRANSPARENT_PNG);

    let response = server.get("/18/131072/131072.png").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=3600"
    );

    let body = body_bytes(response).await;
    assert_eq!(&body[..], TRANSPARENT_PNG);
}

#[tokio::test]
async fn test_tile_retrieval_jpeg_content_type() {
    let server = TestServer::new();
    server.write_tile("3", "1", "2.jpg", b"jpeg bytes");

    let response = server.get("/3/1/2.jpg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
}

#[tokio::test]
async fn test_tile_retrieval_pbf_content_type() {
    let server = TestServer::new();
    server.write_tile("12", "2048", "1365.pbf", b"\x1a\x02vt");

    let response = server.get("/12/2048/1365.pbf").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/x-protobuf"
    );
}

#[tokio::test]
async fn test_unknown_format_served_without_content_type() {
    let server = TestServer::new();
    server.write_tile("5", "1", "2.xyz", b"mystery bytes");

    let response = server.get("/5/1/2.xyz").await;

    // Still 200, but no Content-Type override; the transport default applies
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("content-type").is_none());
    assert!(response.headers().contains_key("cache-control"));

    let body = body_bytes(response).await;
    assert_eq!(&body[..], b"mystery bytes");
}

#[tokio::test]
async fn test_custom_cache_max_age() {
    let server = TestServer::with_config(RouterConfig::new().with_cache_max_age(60));
    server.write_tile("1", "0", "0.png", TRANSPARENT_PNG);

    let response = server.get("/1/0/0.png").await;
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=60"
    );
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let server = TestServer::new();
    server.write_tile("7", "42", "99.png", TRANSPARENT_PNG);

    let first = server.get("/7/42/99.png").await;
    let second = server.get("/7/42/99.png").await;

    assert_eq!(first.status(), second.status());
    assert_eq!(
        first.headers().get("content-type"),
        second.headers().get("content-type")
    );
    assert_eq!(
        first.headers().get("cache-control"),
        second.headers().get("cache-control")
    );

    let first_body = body_bytes(first).await;
    let second_body = body_bytes(second).await;
    assert_eq!(first_body, second_body);
}

// =============================================================================
// Missing Tiles
// =============================================================================

#[tokio::test]
async fn test_tile_not_found() {
    let server = TestServer::new();

    let response = server.get("/19/0/0.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error = body_json(response).await;
    assert_eq!(error["error"], "Tile not found");
    assert_eq!(error["path"], "19/0/0.png");
}

#[tokio::test]
async fn test_tile_not_found_reports_requested_path() {
    let server = TestServer::new();
    // Level exists but the tile does not
    server.write_tile("18", "131072", "131072.png", TRANSPARENT_PNG);

    let response = server.get("/18/131072/131073.webp").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error = body_json(response).await;
    assert_eq!(error["path"], "18/131072/131073.webp");
}

// =============================================================================
// Malformed Segments
// =============================================================================

#[tokio::test]
async fn test_non_numeric_zoom_rejected() {
    let server = TestServer::new();

    let response = server.get("/abc/0/0.png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert_eq!(error["error"], "Invalid tile coordinate");
}

#[tokio::test]
async fn test_non_numeric_x_rejected() {
    let server = TestServer::new();

    let response = server.get("/0/x/0.png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_extension_rejected() {
    let server = TestServer::new();
    server.write_tile("18", "0", "0.png", TRANSPARENT_PNG);

    let response = server.get("/18/0/0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert_eq!(error["error"], "Invalid tile format");
}

#[tokio::test]
async fn test_traversal_segments_rejected() {
    let server = TestServer::new();
    server.write_tile("18", "0", "0.png", TRANSPARENT_PNG);

    // Encoded dot-dot segments decode into the path parameters but fail
    // the digit validation before any filesystem path is built
    let response = server.get("/%2e%2e/0/0.png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server.get("/18/0/%2e%2e%2fsecret.png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
