//! Handlers for the `/models` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use vrobjects_core::error::CoreError;
use vrobjects_core::types::DbId;
use vrobjects_db::models::model_record::{CreateModelRecord, ModelRecord, UpdateModelRecord};
use vrobjects_db::repositories::ModelRecordRepo;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::storage;

pub(crate) fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Model",
        id,
    })
}

/// Load a record or fail with 404.
pub(crate) async fn find_record(state: &AppState, id: DbId) -> AppResult<ModelRecord> {
    ModelRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /models
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ModelRecord>>> {
    let records = ModelRecordRepo::list(&state.pool).await?;
    Ok(Json(records))
}

/// POST /models
///
/// Requires non-empty `name` and `url`; `description` is optional.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateModelRecord>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ModelRecord>)> {
    let Json(input) = payload?;
    let input = input.validate()?;

    let record = ModelRecordRepo::create(&state.pool, &input).await?;
    tracing::info!(id = record.id, name = %record.name, "Model record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /models/search?name=
///
/// Case-insensitive substring match on `name`.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<Vec<ModelRecord>>> {
    let Query(params) = params?;
    let term = params
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'name' query parameter".into()))?;

    let records = ModelRecordRepo::search_by_name(&state.pool, &term).await?;
    Ok(Json(records))
}

/// PUT /models/{id}
///
/// Replaces only the fields present in the body. An unknown id is reported
/// before an unusable body.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateModelRecord>, JsonRejection>,
) -> AppResult<Json<ModelRecord>> {
    let Path(id) = id?;
    let input = match payload {
        Ok(Json(input)) if !input.is_empty() => input,
        rejected => {
            find_record(&state, id).await?;
            return Err(match rejected {
                Err(rejection) => rejection.into(),
                Ok(_) => AppError::BadRequest("No fields to update".into()),
            });
        }
    };

    let record = ModelRecordRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "Model record updated");
    Ok(Json(record))
}

/// DELETE /models/{id}
///
/// The row is deleted inside a transaction and the attached image removed
/// before committing, so a failed file removal leaves the row in place.
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let mut tx = state.pool.begin().await?;

    let removed = ModelRecordRepo::delete(&mut *tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(image) = &removed.image_path {
        let path = state.config.storage.upload_dir.join(image);
        let existed = storage::remove_if_exists(&path).await?;
        tracing::debug!(id, image = %image, existed, "Removed model image");
    }

    tx.commit().await?;
    tracing::info!(id, "Model record deleted");

    Ok(Json(MessageResponse {
        message: format!("Model {id} deleted"),
    }))
}
