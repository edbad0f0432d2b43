//! Liveness endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
///
/// `status` is `"degraded"` rather than an error status when Postgres does not
/// answer, so load balancers can still tell the process is up.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl ServiceHealth {
    fn from_db_probe(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<ServiceHealth> {
    let probe = vrobjects_db::health_check(&state.pool).await;
    if let Err(e) = &probe {
        tracing::warn!(error = %e, "Database health probe failed");
    }
    Json(ServiceHealth::from_db_probe(probe.is_ok()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
