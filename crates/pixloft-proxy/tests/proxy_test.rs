//! Image proxy integration tests.
//!
//! Run with: `cargo test -p pixloft-proxy --test proxy_test`
//! The store is faked with a local mock server; nothing external is needed.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use mockito::Matcher;
use pixloft_core::config::{AppSettings, Config, GallerySettings, ProxySettings, StoreSettings};
use pixloft_proxy::setup::routes::setup_routes;
use pixloft_proxy::state::AppState;
use pixloft_store::StoreClient;

fn test_config(store_endpoint: &str) -> Config {
    Config(Box::new(AppSettings {
        store: StoreSettings {
            endpoint: store_endpoint.to_string(),
            project_id: "p1".to_string(),
            api_key: None,
            bucket_id: "b1".to_string(),
            database_id: "db1".to_string(),
            media_collection_id: "media".to_string(),
            posts_collection_id: "posts".to_string(),
        },
        proxy: ProxySettings {
            server_port: 5000,
            cors_origins: vec!["*".to_string()],
            public_base_url: "http://localhost:5000".to_string(),
        },
        gallery: GallerySettings {
            page_size: 9,
            posts_page_size: 10,
            max_image_size_bytes: 5 * 1024 * 1024,
            cache_path: ".pixloft/gallery_cache.json".into(),
        },
        environment: "test".to_string(),
    }))
}

fn test_server(store_endpoint: &str) -> TestServer {
    let config = test_config(store_endpoint);
    let store = StoreClient::new(config.store().clone()).unwrap();
    let state = Arc::new(AppState::new(config.clone(), store));
    let router = setup_routes(&config, state).unwrap();
    TestServer::new(router).unwrap()
}

#[tokio::test]
async fn test_missing_file_id_returns_exact_body() {
    let server = test_server("http://store.invalid");

    for path in ["/image", "/image/"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), r#"{"error":"File ID is required"}"#);
    }
}

#[tokio::test]
async fn test_blank_file_id_returns_exact_body() {
    let server = test_server("http://store.invalid");

    let response = server.get("/image/%20").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), r#"{"error":"File ID is required"}"#);
}

#[tokio::test]
async fn test_streams_image_with_content_type() {
    let mut store = mockito::Server::new_async().await;
    let mock = store
        .mock("GET", "/storage/buckets/b1/files/f77/view")
        .match_query(Matcher::UrlEncoded("project".into(), "p1".into()))
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(b"PNGDATA".to_vec())
        .create_async()
        .await;

    let server = test_server(&store.url());
    let response = server.get("/image/f77").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.as_bytes().as_ref(), b"PNGDATA");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_missing_file_maps_to_500() {
    let mut store = mockito::Server::new_async().await;
    let mock = store
        .mock("GET", "/storage/buckets/b1/files/gone/view")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"File not found","code":404,"type":"storage_file_not_found"}"#)
        .create_async()
        .await;

    let server = test_server(&store.url());
    let response = server.get("/image/gone").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), r#"{"error":"Image fetch failed"}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_server_error_maps_to_500() {
    let mut store = mockito::Server::new_async().await;
    let mock = store
        .mock("GET", "/storage/buckets/b1/files/f77/view")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream down")
        .create_async()
        .await;

    let server = test_server(&store.url());
    let response = server.get("/image/f77").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), r#"{"error":"Image fetch failed"}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_health_reports_healthy() {
    let server = test_server("http://store.invalid");

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_lists_image_route() {
    let server = test_server("http://store.invalid");

    let response = server.get("/api/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let spec: serde_json::Value = response.json();
    assert!(spec["paths"].get("/image/{file_id}").is_some());
    assert!(spec["paths"].get("/health").is_some());
}

#[tokio::test]
async fn test_request_id_is_echoed_and_preserved() {
    let server = test_server("http://store.invalid");

    let response = server.get("/health").await;
    assert!(!response.header("X-Request-ID").is_empty());

    let response = server
        .get("/health")
        .add_header("X-Request-ID", "trace-me-123")
        .await;
    assert_eq!(response.header("X-Request-ID"), "trace-me-123");
}

#[tokio::test]
async fn test_cors_allows_configured_wildcard() {
    let server = test_server("http://store.invalid");

    let response = server
        .get("/health")
        .add_header("Origin", "http://gallery.example")
        .await;
    assert_eq!(response.header("access-control-allow-origin"), "*");
}
