//! Image upload handlers.
//!
//! Both endpoints read the multipart part named `image`, validate and
//! sanitize its filename, and only then touch the disk.

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use vrobjects_core::types::DbId;
use vrobjects_core::uploads::{record_image_filename, screenshot_filename, validate_image_filename};
use vrobjects_db::repositories::ModelRecordRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::model_record::{find_record, not_found};
use crate::response::UploadResponse;
use crate::state::AppState;
use crate::storage;

/// Name of the multipart part carrying the file.
const IMAGE_FIELD: &str = "image";

/// The `image` part of an upload request.
struct ImagePart {
    filename: Option<String>,
    data: Bytes,
}

/// Pull the `image` part out of a multipart body, ignoring other parts.
async fn read_image_part(mut multipart: Multipart) -> AppResult<ImagePart> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await?;
        return Ok(ImagePart { filename, data });
    }

    Err(AppError::BadRequest(format!(
        "Missing '{IMAGE_FIELD}' file in request"
    )))
}

/// POST /models/{id}/upload-image
///
/// Stores the image as `{id}_{filename}` in the upload directory and points
/// the record's `image_path` at it.
pub async fn upload_model_image(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let Path(id) = id?;
    let part = read_image_part(multipart?).await?;
    let sanitized = validate_image_filename(part.filename.as_deref())?;

    find_record(&state, id).await?;

    let stored = record_image_filename(id, &sanitized);
    let path = state.config.storage.upload_dir.join(&stored);
    tokio::fs::write(&path, &part.data).await?;

    let updated = match ModelRecordRepo::set_image_path(&state.pool, id, &stored).await {
        Ok(updated) => updated,
        Err(e) => {
            discard_upload(&path).await;
            return Err(e.into());
        }
    };
    if updated.is_none() {
        // Deleted between the lookup and the update.
        discard_upload(&path).await;
        return Err(not_found(id));
    }

    tracing::info!(id, file = %stored, bytes = part.data.len(), "Model image uploaded");
    Ok(Json(UploadResponse {
        message: "Image uploaded".to_string(),
        image_url: format!("/uploads/{stored}"),
    }))
}

/// POST /upload-screenshot
///
/// Stores the image as `{unix_seconds}_{filename}` in the screenshots
/// directory. No database access.
pub async fn upload_screenshot(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let part = read_image_part(multipart?).await?;
    let sanitized = validate_image_filename(part.filename.as_deref())?;

    let stored = screenshot_filename(chrono::Utc::now().timestamp(), &sanitized);
    let path = state.config.storage.screenshots_dir.join(&stored);
    tokio::fs::write(&path, &part.data).await?;

    tracing::info!(file = %stored, bytes = part.data.len(), "Screenshot uploaded");
    Ok(Json(UploadResponse {
        message: "Screenshot uploaded".to_string(),
        image_url: format!("/screenshots/{stored}"),
    }))
}

/// Best-effort removal of a file written for a request that then failed.
async fn discard_upload(path: &std::path::Path) {
    if let Err(e) = storage::remove_if_exists(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to discard orphaned upload");
    }
}
