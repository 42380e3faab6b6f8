//! # Emporium Admin API
//!
//! JSON API behind the store's admin dashboard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Admin API Routes                               │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  /products     │  │  /inventory    │  │  /revenue                  ││
//! │  │                │  │                │  │                            ││
//! │  │ • list/filter  │  │ • list         │  │ • daily / weekly           ││
//! │  │ • create       │  │ • low-stock    │  │ • monthly / annual         ││
//! │  │ • get/update   │  │ • set quantity │  │ • compare                  ││
//! │  │ • delete       │  │ • history      │  │   (RevenueEngine)          ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐            │
//! │  │  /categories   │  │  /sales        │  │  /health       │            │
//! │  └────────────────┘  └────────────────┘  └────────────────┘            │
//! │                                                                         │
//! │  Layers: TraceLayer (request spans) → CorsLayer                        │
//! │  State:  AppState { db: Database }                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (see [`config::ApiConfig`]):
//! - `API_HOST` / `API_PORT` - listener (default: 0.0.0.0:8000)
//! - `API_PREFIX` - route prefix (default: /api)
//! - `DATABASE_PATH` - SQLite file (default: ./emporium.db)
//! - `DATABASE_MAX_CONNECTIONS` - pool size (default: 5)
//! - `CORS_ORIGINS` - comma separated, empty allows any origin
//! - `DEBUG` - debug-level SQL logging

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

/// Builds the full application router with middleware.
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    let api = routes::api_routes();

    let router = if config.prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&config.prefix, api)
    };

    router
        .merge(routes::root_routes())
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
