//! Database access: the [`ProductionDatabase`] trait and its ODBC
//! implementation.

mod odbc;

pub use odbc::OdbcDatabase;

use crate::catalog::RecordQuery;
use crate::error::DbResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// One result row keyed by column alias. Cells are text as delivered by the
/// driver; `None` is SQL NULL. Fixed-width padding is preserved here and
/// stripped by the mapper.
pub type RawRow = HashMap<String, Option<String>>;

/// Read-only access to the production data on the AS/400.
///
/// Implemented by [`OdbcDatabase`] for the real system and by in-memory
/// fixtures in tests. Every call is self-contained: implementations open and
/// release whatever resources they need within the call.
#[async_trait]
pub trait ProductionDatabase: Send + Sync {
    /// Runs the connectivity probe. Success means the system is reachable
    /// and the credentials are accepted.
    async fn probe(&self) -> DbResult<()>;

    /// Fetches production fact rows for the given date range and optional
    /// line filter, ordered descending by completion date.
    async fn fetch_records(&self, query: RecordQuery) -> DbResult<Vec<RawRow>>;

    /// Lists the distinct decoded line names, ascending.
    async fn list_lines(&self) -> DbResult<Vec<String>>;
}
