//! Model record entity and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use vrobjects_core::error::CoreError;
use vrobjects_core::types::DbId;

/// A row from the `objects` table.
///
/// `image_path` holds a bare filename inside the upload directory, never a
/// full path.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ModelRecord {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
}

/// Request body for creating a record.
///
/// `name` and `url` are optional on the wire so a missing value surfaces as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateModelRecord {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// A create request that passed [`CreateModelRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewModelRecord {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
}

impl CreateModelRecord {
    /// Require non-empty `name` and `url`.
    pub fn validate(self) -> Result<NewModelRecord, CoreError> {
        match (self.name, self.url) {
            (Some(name), Some(url)) if !name.is_empty() && !url.is_empty() => Ok(NewModelRecord {
                name,
                url,
                description: self.description,
            }),
            _ => Err(CoreError::Validation(
                "Missing 'name' or 'url' in JSON body".into(),
            )),
        }
    }
}

/// Request body for a partial update. Only fields present are applied.
///
/// `description` distinguishes absent (`None`) from an explicit `null`
/// (`Some(None)`), which clears the column. `name` and `url` are NOT NULL
/// columns, so an explicit `null` for them is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateModelRecord {
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

impl UpdateModelRecord {
    /// True when the body carries nothing to update.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.description.is_none()
    }
}

/// Wrap any present value (including `null`) in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
