//! Service health endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

/// GET /health -- liveness plus a database round-trip.
async fn health(State(state): State<AppState>) -> Json<HealthPayload> {
    let db_up = pestops_db::health_check(&state.pool).await.is_ok();

    Json(HealthPayload {
        status: if db_up { "ok" } else { "degraded" },
        database: if db_up { "up" } else { "down" },
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health route, mounted at the root rather than under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
