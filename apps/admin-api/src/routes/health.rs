//! Welcome and health endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Emporium Admin API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Reports database liveness; 503 when the pool cannot run a query.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database_ok = state.db.health_check().await;

    let (status, label) = if database_ok {
        (StatusCode::OK, "ok")
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(json!({
            "status": label,
            "database": database_ok,
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
