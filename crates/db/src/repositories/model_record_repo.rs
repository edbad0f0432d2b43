//! Repository for the `objects` table.

use sqlx::{PgExecutor, PgPool};
use vrobjects_core::types::DbId;

use crate::models::model_record::{ModelRecord, NewModelRecord, UpdateModelRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, url, description, image_path";

/// Provides CRUD operations for model records.
pub struct ModelRecordRepo;

impl ModelRecordRepo {
    /// Insert a new record, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewModelRecord) -> Result<ModelRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO objects (name, url, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ModelRecord>(&query)
            .bind(&input.name)
            .bind(&input.url)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a record by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ModelRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM objects WHERE id = $1");
        sqlx::query_as::<_, ModelRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every record ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<ModelRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM objects ORDER BY id");
        sqlx::query_as::<_, ModelRecord>(&query)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on `name`.
    ///
    /// LIKE metacharacters in `term` match literally.
    pub async fn search_by_name(pool: &PgPool, term: &str) -> Result<Vec<ModelRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM objects WHERE name ILIKE $1 ESCAPE '\\' ORDER BY id"
        );
        sqlx::query_as::<_, ModelRecord>(&query)
            .bind(contains_pattern(term))
            .fetch_all(pool)
            .await
    }

    /// Apply the fields present in `input`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateModelRecord,
    ) -> Result<Option<ModelRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE objects SET
                name = COALESCE($2, name),
                url = COALESCE($3, url),
                description = CASE WHEN $4 THEN $5 ELSE description END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ModelRecord>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.url)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Point `image_path` at a stored upload. Returns `None` if the row is gone.
    pub async fn set_image_path(
        pool: &PgPool,
        id: DbId,
        filename: &str,
    ) -> Result<Option<ModelRecord>, sqlx::Error> {
        let query = format!("UPDATE objects SET image_path = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, ModelRecord>(&query)
            .bind(id)
            .bind(filename)
            .fetch_optional(pool)
            .await
    }

    /// Delete a record, returning the removed row.
    ///
    /// Takes any executor so callers can run it inside a transaction and
    /// clean up the record's files before committing.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<Option<ModelRecord>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("DELETE FROM objects WHERE id = $1 RETURNING {COLUMNS}");
        let removed = sqlx::query_as::<_, ModelRecord>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        if removed.is_some() {
            tracing::debug!(id, "Deleted model record row");
        }
        Ok(removed)
    }
}

/// Build an `ILIKE` pattern matching `term` anywhere, escaping `\`, `%` and `_`.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
