//! Shared request-handler state.
//!
//! The database handle is the trait object so tests can swap in a fixture
//! store for the ODBC implementation. Nothing here is mutable: each request
//! opens its own connection and the export path is only ever overwritten
//! wholesale.

use crate::config::ServerConfig;
use crate::database::ProductionDatabase;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub database: Arc<dyn ProductionDatabase>,
    pub export_path: PathBuf,
}

impl AppState {
    pub fn new(database: Arc<dyn ProductionDatabase>, config: &ServerConfig) -> Self {
        Self {
            database,
            export_path: config.export_path.clone(),
        }
    }
}
