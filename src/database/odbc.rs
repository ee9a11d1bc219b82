//! ODBC implementation of [`ProductionDatabase`].
//!
//! ODBC is a synchronous API, so every operation clones the connection
//! configuration and runs on the blocking thread pool. A connection is opened
//! at the start of the call and dropped on every exit path, so the handle is
//! released exactly once even when row reading fails mid-way.

use crate::catalog::{self, RecordQuery};
use crate::config::ConnectionConfig;
use crate::database::{ProductionDatabase, RawRow};
use crate::error::{classify_driver_error, DbError, DbResult};
use async_trait::async_trait;
use odbc_api::buffers::TextRowSet;
use odbc_api::{Connection, ConnectionOptions, Cursor, Environment, IntoParameter, ResultSetMetadata};
use once_cell::sync::OnceCell;
use tracing::debug;

/// Rows fetched per driver round-trip.
const BATCH_SIZE: usize = 1024;

/// Upper bound on a single text cell. The production columns are all short
/// fixed-width fields, so truncation never happens in practice.
const MAX_CELL_BYTES: usize = 4096;

/// The ODBC environment must outlive every connection; one per process.
static ENVIRONMENT: OnceCell<Environment> = OnceCell::new();

fn environment() -> DbResult<&'static Environment> {
    ENVIRONMENT.get_or_try_init(|| Environment::new().map_err(db_err))
}

fn db_err(err: odbc_api::Error) -> DbError {
    classify_driver_error(&err.to_string())
}

/// Per-request ODBC access to the AS/400.
pub struct OdbcDatabase {
    config: ConnectionConfig,
}

impl OdbcDatabase {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

fn open(config: &ConnectionConfig) -> DbResult<Connection<'static>> {
    environment()?
        .connect_with_connection_string(&config.connection_string(), ConnectionOptions::default())
        .map_err(db_err)
}

/// Drains a cursor into text rows keyed by column alias. NULL cells come
/// through as `None`; fixed-width padding is preserved for the mapper.
fn collect_rows(mut cursor: impl Cursor) -> DbResult<Vec<RawRow>> {
    let names: Vec<String> = cursor
        .column_names()
        .map_err(db_err)?
        .collect::<std::result::Result<_, _>>()
        .map_err(db_err)?;

    let mut buffers =
        TextRowSet::for_cursor(BATCH_SIZE, &mut cursor, Some(MAX_CELL_BYTES)).map_err(db_err)?;
    let mut block_cursor = cursor.bind_buffer(&mut buffers).map_err(db_err)?;

    let mut rows = Vec::new();
    while let Some(batch) = block_cursor.fetch().map_err(db_err)? {
        for row_index in 0..batch.num_rows() {
            let mut row = RawRow::with_capacity(names.len());
            for (col_index, name) in names.iter().enumerate() {
                let cell = batch
                    .at(col_index, row_index)
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned());
                row.insert(name.clone(), cell);
            }
            rows.push(row);
        }
    }
    Ok(rows)
}

#[async_trait]
impl ProductionDatabase for OdbcDatabase {
    async fn probe(&self) -> DbResult<()> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || {
            let connection = open(&config)?;
            connection
                .execute(catalog::PROBE_SQL, ())
                .map_err(db_err)?;
            Ok(())
        })
        .await
        .map_err(|e| DbError::Other(format!("blocking task failed: {e}")))?
    }

    async fn fetch_records(&self, query: RecordQuery) -> DbResult<Vec<RawRow>> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || {
            let connection = open(&config)?;
            let sql = catalog::fetch_records_sql(&config.library, query.line.is_some());

            let cursor = match &query.line {
                Some(line) => connection
                    .execute(
                        &sql,
                        (
                            &query.start_date.as_str().into_parameter(),
                            &query.end_date.as_str().into_parameter(),
                            &line.as_str().into_parameter(),
                        ),
                    )
                    .map_err(db_err)?,
                None => connection
                    .execute(
                        &sql,
                        (
                            &query.start_date.as_str().into_parameter(),
                            &query.end_date.as_str().into_parameter(),
                        ),
                    )
                    .map_err(db_err)?,
            };

            let rows = match cursor {
                Some(cursor) => collect_rows(cursor)?,
                None => Vec::new(),
            };
            debug!(rows = rows.len(), "fetched production rows");
            Ok(rows)
        })
        .await
        .map_err(|e| DbError::Other(format!("blocking task failed: {e}")))?
    }

    async fn list_lines(&self) -> DbResult<Vec<String>> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || {
            let connection = open(&config)?;
            let sql = catalog::list_lines_sql(&config.library);
            let cursor = connection.execute(&sql, ()).map_err(db_err)?;

            let rows = match cursor {
                Some(cursor) => collect_rows(cursor)?,
                None => Vec::new(),
            };
            let lines = rows
                .into_iter()
                .filter_map(|mut row| row.remove("LN_NAME").flatten())
                .map(|name| name.trim().to_string())
                .collect::<Vec<_>>();
            debug!(lines = lines.len(), "fetched production lines");
            Ok(lines)
        })
        .await
        .map_err(|e| DbError::Other(format!("blocking task failed: {e}")))?
    }
}
