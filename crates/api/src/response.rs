//! Response bodies that are not entity rows.

use serde::Serialize;

/// `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Result of a successful image or screenshot upload.
///
/// `image_url` is relative to the server root, e.g. `/uploads/7_chair.png`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub image_url: String,
}
