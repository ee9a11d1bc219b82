//! The three fixed SQL statements issued against the AS/400.
//!
//! Production data lives in three library tables: `F9H00` (production fact),
//! `FA000` (item master) and `C0900` (dimension decode). The decode table
//! packs the line descriptor into `DDTC09`; positions 1-3 and 4-5 carry the
//! line group/sub codes and are matched against the fact table's own split
//! line fields. Only descriptor group `LN1C` at sub-position `01` decodes to
//! a line name.

use serde::{Deserialize, Serialize};

/// The six line-code prefixes the dashboard reports on. Rows for any other
/// line are excluded everywhere; this is a business rule, not incidental.
pub const ALLOWED_LINE_PREFIXES: [&str; 6] = ["111", "121", "312", "313", "161", "315"];

/// Wide static date range applied when a caller omits the bounds.
pub const DEFAULT_START_DATE: &str = "20250101";
pub const DEFAULT_END_DATE: &str = "20251231";

/// Connectivity probe against a system table that always exists.
pub const PROBE_SQL: &str = "SELECT 1 FROM SYSIBM.SYSDUMMY1";

/// Parameters for a production record fetch.
///
/// Dates are fixed-width `YYYYMMDD` strings, inclusive bounds. `line` is an
/// optional exact-match filter on the decoded line name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    pub start_date: String,
    pub end_date: String,
    pub line: Option<String>,
}

impl RecordQuery {
    /// Builds a query, applying the default wide range for missing bounds.
    /// An empty `line` value counts as no filter.
    pub fn new(start_date: Option<String>, end_date: Option<String>, line: Option<String>) -> Self {
        Self {
            start_date: start_date.unwrap_or_else(|| DEFAULT_START_DATE.to_string()),
            end_date: end_date.unwrap_or_else(|| DEFAULT_END_DATE.to_string()),
            line: line.filter(|l| !l.is_empty()),
        }
    }
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

fn allowed_prefix_list() -> String {
    ALLOWED_LINE_PREFIXES
        .iter()
        .map(|p| format!("'{p}'"))
        .collect::<Vec<_>>()
        .join(",")
}

/// SQL for the production record fetch.
///
/// Binds two date parameters, plus a third line-name parameter when
/// `with_line_filter` is set. The filter predicate is appended before the
/// `ORDER BY`, which sorts descending by completion date.
pub fn fetch_records_sql(library: &str, with_line_filter: bool) -> String {
    let mut sql = format!(
        "SELECT \
            PCPU9H AS COMP_DAY, \
            LN1C9H AS LINE1, \
            LN2C9H AS LINE2, \
            LN_NAME, \
            PSHN9H AS PR, \
            ITMC9H AS ITEM, \
            IT1IA0 AS ITEM1, \
            IT2IA0 AS ITEM2, \
            PSHQ9H AS EST_PRO_QTY, \
            PCPQ9H AS ACT_PRO_QTY, \
            QUNC9H AS UNIT, \
            SIZCA0 AS SIZE, \
            CHNCA0 AS CH \
        FROM {library}.F9H00 \
        INNER JOIN {library}.FA000 ON ITMC9H = ITMCA0 \
        INNER JOIN ( \
            SELECT DGRC09, SUBSTR(DDTC09,1,3) AS LN1, SUBSTR(DDTC09,4,2) AS LN2, \
            CN1I09 AS LN_NAME FROM {library}.C0900 \
            WHERE DGRC09 = 'LN1C' AND SUBSTR(DDTC09,6,2) = '01' \
        ) AS LINE_INFO ON LINE_INFO.LN1 = LN1C9H AND LINE_INFO.LN2 = LN2C9H \
        WHERE PCPU9H BETWEEN ? AND ? \
        AND LN1C9H IN ({prefixes})",
        library = library,
        prefixes = allowed_prefix_list(),
    );
    if with_line_filter {
        sql.push_str(" AND LN_NAME = ?");
    }
    sql.push_str(" ORDER BY PCPU9H DESC");
    sql
}

/// SQL for the distinct decoded line name listing, ascending.
pub fn list_lines_sql(library: &str) -> String {
    format!(
        "SELECT DISTINCT CN1I09 AS LN_NAME \
        FROM {library}.C0900 \
        WHERE DGRC09 = 'LN1C' AND SUBSTR(DDTC09,6,2) = '01' \
        AND SUBSTR(DDTC09,1,3) IN ({prefixes}) \
        ORDER BY LN_NAME",
        library = library,
        prefixes = allowed_prefix_list(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_query_defaults() {
        let query = RecordQuery::new(None, None, None);
        assert_eq!(query.start_date, "20250101");
        assert_eq!(query.end_date, "20251231");
        assert!(query.line.is_none());
    }

    #[test]
    fn test_record_query_empty_line_is_no_filter() {
        let query = RecordQuery::new(None, None, Some(String::new()));
        assert!(query.line.is_none());
    }

    #[test]
    fn test_fetch_sql_contains_allow_list_and_ordering() {
        let sql = fetch_records_sql("WAVEDLIB", false);
        assert!(sql.contains("WAVEDLIB.F9H00"));
        assert!(sql.contains("WAVEDLIB.FA000"));
        assert!(sql.contains("LN1C9H IN ('111','121','312','313','161','315')"));
        assert!(sql.ends_with("ORDER BY PCPU9H DESC"));
        assert!(!sql.contains("LN_NAME = ?"));
    }

    #[test]
    fn test_fetch_sql_line_filter_precedes_ordering() {
        let sql = fetch_records_sql("WAVEDLIB", true);
        let filter_pos = sql.find("AND LN_NAME = ?").unwrap();
        let order_pos = sql.find("ORDER BY PCPU9H DESC").unwrap();
        assert!(filter_pos < order_pos);
    }

    #[test]
    fn test_fetch_sql_binds_two_date_parameters() {
        let sql = fetch_records_sql("WAVEDLIB", false);
        assert_eq!(sql.matches('?').count(), 2);
        assert_eq!(fetch_records_sql("WAVEDLIB", true).matches('?').count(), 3);
    }

    #[test]
    fn test_list_lines_sql() {
        let sql = list_lines_sql("WAVEDLIB");
        assert!(sql.contains("SELECT DISTINCT CN1I09 AS LN_NAME"));
        assert!(sql.contains("WAVEDLIB.C0900"));
        assert!(sql.contains("SUBSTR(DDTC09,1,3) IN ('111','121','312','313','161','315')"));
        assert!(sql.ends_with("ORDER BY LN_NAME"));
    }

    #[test]
    fn test_library_is_substituted_everywhere() {
        let sql = fetch_records_sql("PRODLIB", false);
        assert!(!sql.contains("WAVEDLIB"));
        assert_eq!(sql.matches("PRODLIB.").count(), 3);
    }
}
