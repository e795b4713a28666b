use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Database;

/// Shared application state handed to every handler via axum's `State`.
///
/// The store handle and configuration are constructed once in `main` (or per
/// test) and passed explicitly; there are no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self { db, config: Arc::new(config) }
    }
}
