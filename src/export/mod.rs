//! One-shot JSON snapshot of the full production record list.
//!
//! The snapshot is a diagnostic artifact, not a managed store: the file is
//! overwritten wholesale on every export and concurrent exports are
//! last-write-wins.

use crate::error::Result;
use crate::mapper::ProductionRecord;
use std::path::Path;
use tracing::info;

/// Writes the records as pretty-printed UTF-8 JSON to `path`, replacing any
/// previous snapshot. Returns the number of records written.
pub fn write_snapshot(path: &Path, records: &[ProductionRecord]) -> Result<usize> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    info!(records = records.len(), path = %path.display(), "snapshot written");
    Ok(records.len())
}
