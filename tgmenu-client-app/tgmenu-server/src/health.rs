//! Liveness and readiness endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Clone)]
pub struct HealthState {
    /// Present when the postgres backend is active
    pub db: Option<PgPool>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

pub async fn readiness_check(State(state): State<HealthState>) -> StatusCode {
    let Some(pool) = state.db.as_ref() else {
        return StatusCode::OK;
    };

    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
