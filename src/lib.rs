//! HTTP bridge between the plant dashboard and an IBM i (AS/400) system.
//!
//! Queries manufacturing production records over the IBM i Access ODBC
//! driver, reshapes the fixed-width rows into the JSON schema the dashboard
//! expects, and serves them on a small CORS-enabled REST surface.
//!
//! Every request opens its own database connection, runs one query, maps the
//! rows, and closes the connection. There is no pooling, caching, or retry
//! logic anywhere in this crate.
//!
//! # Example
//!
//! ```no_run
//! use as400_production_api::{
//!     config::{ConnectionConfigBuilder, ServerConfig},
//!     database::OdbcDatabase,
//!     server::{build_router, AppState},
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let connection = ConnectionConfigBuilder::new().from_env()?.build()?;
//!     let server = ServerConfig::from_env();
//!
//!     let state = AppState::new(Arc::new(OdbcDatabase::new(connection)), &server);
//!     let app = build_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind(server.bind_address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod mapper;
pub mod server;

pub use catalog::{RecordQuery, ALLOWED_LINE_PREFIXES};
pub use config::{ConnectionConfig, ConnectionConfigBuilder, ServerConfig};
pub use database::{OdbcDatabase, ProductionDatabase, RawRow};
pub use error::{ApiError, DbError, Result};
pub use mapper::ProductionRecord;
pub use server::{build_router, AppState};
