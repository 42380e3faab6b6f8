//! # Emporium Admin API
//!
//! HTTP server entry point.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Admin API Server                                 │
//! │                                                                         │
//! │  .env / environment ───► ApiConfig                                     │
//! │                             │                                           │
//! │                             ▼                                           │
//! │  Database::new (pool + migrations) ───► AppState                       │
//! │                                            │                            │
//! │                                            ▼                            │
//! │  axum::serve(0.0.0.0:8000) ◄── build_router (prefix, CORS, tracing)    │
//! │        │                                                                │
//! │        └── graceful shutdown on Ctrl+C / SIGTERM                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use admin_api::{build_router, ApiConfig, AppState};
use emporium_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load()?;
    init_tracing(config.debug);

    info!("Starting Emporium Admin API...");
    info!(
        address = %config.bind_address(),
        prefix = %config.prefix,
        database = %config.database_path.display(),
        "Configuration loaded"
    );

    let db_config = DbConfig::new(&config.database_path).max_connections(config.database_max_connections);
    let db = Database::new(db_config)
        .await
        .context("failed to open database")?;
    info!("Database ready");

    let app = build_router(AppState::new(db.clone()), &config);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!(address = %config.bind_address(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins; otherwise `DEBUG=true` turns on SQL statement logging.
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "info,emporium=debug,admin_api=debug,sqlx=debug"
    } else {
        "info,emporium=debug,sqlx=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
