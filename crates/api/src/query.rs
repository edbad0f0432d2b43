//! Query parameter types for API handlers.

use serde::Deserialize;

/// `?name=` for `GET /models/search`.
///
/// Optional here so a missing parameter is reported as a 400 with the
/// standard error body.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}
