use std::path::PathBuf;

use axum::http::HeaderValue;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`. `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes (default: 25 MiB).
    pub max_upload_bytes: usize,
    /// Where uploaded files live and where model assets are served from.
    pub storage: StorageConfig,
}

/// The three directories the server reads and writes.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Images attached to model records (`/uploads/...`).
    pub upload_dir: PathBuf,
    /// Screenshots not tied to any record (`/screenshots/...`).
    pub screenshots_dir: PathBuf,
    /// Read-only 3D asset files (`/models/...`).
    pub models_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    InvalidNumber {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default       |
    /// |------------------------|---------------|
    /// | `HOST`                 | `0.0.0.0`     |
    /// | `PORT`                 | `5000`        |
    /// | `CORS_ORIGINS`         | `*`           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`          |
    /// | `MAX_UPLOAD_BYTES`     | `26214400`    |
    /// | `UPLOAD_DIR`           | `uploads`     |
    /// | `SCREENSHOTS_DIR`      | `screenshots` |
    /// | `MODELS_DIR`           | `models`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse_number("PORT", "u16", var("PORT", "5000"))?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in cors_origins.iter().filter(|o| *o != "*") {
            HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?;
        }

        let request_timeout_secs =
            parse_number("REQUEST_TIMEOUT_SECS", "u64", var("REQUEST_TIMEOUT_SECS", "30"))?;
        let max_upload_bytes = parse_number(
            "MAX_UPLOAD_BYTES",
            "usize",
            var("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string()),
        )?;

        let storage = StorageConfig {
            upload_dir: var("UPLOAD_DIR", "uploads").into(),
            screenshots_dir: var("SCREENSHOTS_DIR", "screenshots").into(),
            models_dir: var("MODELS_DIR", "models").into(),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            storage,
        })
    }

    /// Whether `CORS_ORIGINS` opens the API to every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_number<T: std::str::FromStr>(
    key: &'static str,
    expected: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            expected,
            value,
        })
}
