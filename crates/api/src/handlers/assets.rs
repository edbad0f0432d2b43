//! 3D model asset serving and the `/models/{id}` dispatch.
//!
//! `GET /models/{segment}` is shared between records and assets: a segment
//! that parses as an id is a record lookup, anything else is a file in the
//! models directory. Deeper paths (`/models/chairs/oak.glb`) never match a
//! record route and arrive through [`fallback`].

use std::convert::Infallible;
use std::path::Path as FsPath;

use axum::extract::{Path, Request, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use vrobjects_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::handlers::model_record::find_record;
use crate::state::AppState;

/// URL prefix under which model assets are exposed.
const MODELS_PREFIX: &str = "/models";

/// GET /models/{id}
pub async fn get_record_or_asset(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    request: Request,
) -> AppResult<Response> {
    match segment.parse::<DbId>() {
        Ok(id) => {
            let record = find_record(&state, id).await?;
            Ok(Json(record).into_response())
        }
        Err(_) => Ok(serve_model_asset(&state, request).await),
    }
}

/// Router fallback: GET/HEAD under `/models/` serve assets, everything else is 404.
pub async fn fallback(State(state): State<AppState>, request: Request) -> Response {
    let is_read = matches!(*request.method(), Method::GET | Method::HEAD);
    let under_models = request
        .uri()
        .path()
        .strip_prefix(MODELS_PREFIX)
        .is_some_and(|rest| rest.starts_with('/'));

    if is_read && under_models {
        return serve_model_asset(&state, request).await;
    }

    AppError::RouteNotFound(format!("No route for {} {}", request.method(), request.uri().path()))
        .into_response()
}

async fn serve_model_asset(state: &AppState, request: Request) -> Response {
    serve_from_dir(&state.config.storage.models_dir, MODELS_PREFIX, request).await
}

/// Serve the file `dir` + (request path minus `prefix`).
///
/// The still-encoded request path is handed to [`ServeDir`], which decodes
/// it, rejects `..` components, and answers 404 for missing files.
async fn serve_from_dir(dir: &FsPath, prefix: &str, request: Request) -> Response {
    let (mut parts, body) = request.into_parts();

    let path = parts.uri.path();
    let relative = path.strip_prefix(prefix).unwrap_or(path);
    let uri = match relative.parse::<Uri>() {
        Ok(uri) => uri,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    parts.uri = uri;

    let result: Result<_, Infallible> = ServeDir::new(dir)
        .oneshot(Request::from_parts(parts, body))
        .await;
    match result {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
