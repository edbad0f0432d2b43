#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use vrobjects_api::config::{ServerConfig, StorageConfig};
use vrobjects_api::router::build_app_router;
use vrobjects_api::state::AppState;

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "vrobjects-test-boundary";

/// Per-test storage directories under a temporary root.
///
/// The directories are removed when the returned [`TempDir`] drops, so keep
/// it alive for the whole test.
pub fn test_storage() -> (TempDir, StorageConfig) {
    let root = tempfile::tempdir().expect("failed to create temp dir");
    let storage = StorageConfig {
        upload_dir: root.path().join("uploads"),
        screenshots_dir: root.path().join("screenshots"),
        models_dir: root.path().join("models"),
    };
    for dir in [
        &storage.upload_dir,
        &storage.screenshots_dir,
        &storage.models_dir,
    ] {
        std::fs::create_dir_all(dir).expect("failed to create storage dir");
    }
    (root, storage)
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(storage: &StorageConfig) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        storage: storage.clone(),
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given pool and storage directories.
pub fn build_test_app(pool: PgPool, storage: &StorageConfig) -> Router {
    let config = test_config(storage);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, json).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, json).await
}

async fn send_json(app: Router, method: Method, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    send(app, request).await
}

/// A `multipart/form-data` body with a single file part.
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn post_file(
    app: Router,
    uri: &str,
    field: &str,
    filename: &str,
    data: &[u8],
) -> Response<Body> {
    post_multipart(app, uri, multipart_body(field, filename, data)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a record through the API and return its id.
pub async fn create_model(pool: &PgPool, storage: &StorageConfig, name: &str) -> i64 {
    let app = build_test_app(pool.clone(), storage);
    let response = post_json(
        app,
        "/models",
        serde_json::json!({
            "name": name,
            "url": format!("https://assets.example.com/{name}.glb"),
            "description": format!("{name} description"),
        }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}
