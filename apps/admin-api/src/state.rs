//! Shared application state.

use emporium_db::Database;

/// State handed to every handler. Cloning is cheap: `Database` wraps a
/// reference-counted pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
