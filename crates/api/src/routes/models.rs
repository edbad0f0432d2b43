//! Route definitions for the `/models` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assets, model_record, uploads};
use crate::state::AppState;

/// Record routes.
///
/// ```text
/// GET    /models                      -> list
/// POST   /models                      -> create
/// GET    /models/search               -> search
/// GET    /models/{id}                 -> get_record_or_asset
/// PUT    /models/{id}                 -> update
/// DELETE /models/{id}                 -> delete
/// GET    /models/{id}/upload-image    -> assets::fallback
/// POST   /models/{id}/upload-image    -> upload_model_image
/// ```
///
/// `/models/search` is static and always wins over `/models/{id}`. A GET on
/// `.../upload-image` is an asset path like any other nested one.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/models", get(model_record::list).post(model_record::create))
        .route("/models/search", get(model_record::search))
        .route(
            "/models/{id}",
            get(assets::get_record_or_asset)
                .put(model_record::update)
                .delete(model_record::delete),
        )
        .route(
            "/models/{id}/upload-image",
            get(assets::fallback).post(uploads::upload_model_image),
        )
}
