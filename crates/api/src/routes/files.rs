//! Upload endpoint for screenshots and read-only serving of stored files.

use axum::routing::post;
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::StorageConfig;
use crate::handlers::uploads;
use crate::state::AppState;

/// ```text
/// POST /upload-screenshot          -> upload_screenshot
/// GET  /uploads/{filename}         -> upload directory
/// GET  /screenshots/{filename}     -> screenshots directory
/// ```
pub fn router(storage: &StorageConfig) -> Router<AppState> {
    Router::new()
        .route("/upload-screenshot", post(uploads::upload_screenshot))
        .nest_service("/uploads", ServeDir::new(&storage.upload_dir))
        .nest_service("/screenshots", ServeDir::new(&storage.screenshots_dir))
}
