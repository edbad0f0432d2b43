pub mod files;
pub mod health;
pub mod models;

use axum::Router;

use crate::config::StorageConfig;
use crate::handlers;
use crate::state::AppState;

/// Build the full route tree (mounted at the server root).
///
/// Route hierarchy:
///
/// ```text
/// /health                          service + database health
///
/// /models                          list, create
/// /models/search?name=             case-insensitive name search
/// /models/{id}                     get, update, delete (GET with a
///                                  non-numeric segment serves an asset)
/// /models/{id}/upload-image        attach image (POST, multipart `image`)
///
/// /upload-screenshot               store screenshot (POST, multipart `image`)
/// /uploads/{filename}              stored model images
/// /screenshots/{filename}          stored screenshots
///
/// /models/{path...}                3D model assets (fallback, GET/HEAD)
/// ```
pub fn app_routes(storage: &StorageConfig) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(models::router())
        .merge(files::router(storage))
        .fallback(handlers::assets::fallback)
}
