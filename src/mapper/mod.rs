//! Row-to-record transformation shared by both fetch endpoints.
//!
//! The upstream store delivers fixed-width padded character fields, so every
//! string that carries padding is trimmed on egress. Quantities arrive as
//! decimal text and coerce to zero when NULL or absent. The two endpoints
//! differ only in the synthetic `id`/`note` fields, so one mapping function
//! takes an `include_synthetic` flag instead of duplicating the table.

use crate::catalog::ALLOWED_LINE_PREFIXES;
use crate::database::RawRow;
use serde::{Deserialize, Serialize};

/// One production record in the shape the dashboard consumes.
///
/// `id` and `note` are serialized only on the filtered-fetch endpoint; the
/// export endpoint omits both keys entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub area: String,
    pub week: String,
    pub line: String,
    pub itemcode: String,
    pub item1: String,
    pub item2: String,
    #[serde(rename = "planQty")]
    pub plan_qty: f64,
    #[serde(rename = "actualQty")]
    pub actual_qty: f64,
    pub unit: String,
    pub date: String,
    pub group: String,
    pub item3: String,
    pub size: String,
    #[serde(rename = "qcPass")]
    pub qc_pass: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Stringifies a cell, treating NULL and absent alike as empty.
fn text(row: &RawRow, alias: &str) -> String {
    row.get(alias).and_then(|v| v.clone()).unwrap_or_default()
}

/// Like [`text`] but strips the fixed-width padding.
fn trimmed(row: &RawRow, alias: &str) -> String {
    text(row, alias).trim().to_string()
}

/// Coerces a quantity cell to a number; NULL, absent and unparseable all
/// become zero.
fn quantity(row: &RawRow, alias: &str) -> f64 {
    row.get(alias)
        .and_then(|v| v.as_deref())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Unit of measure, defaulting to `KG` when NULL, absent or blank.
fn unit(row: &RawRow) -> String {
    let value = trimmed(row, "UNIT");
    if value.is_empty() {
        "KG".to_string()
    } else {
        value
    }
}

/// Maps one raw row. `position` is the 1-based slot in the output sequence
/// and drives the synthetic `row-N` identifier; `None` omits both synthetic
/// fields.
pub fn map_row(row: &RawRow, position: Option<usize>) -> ProductionRecord {
    ProductionRecord {
        id: position.map(|n| format!("row-{n}")),
        area: text(row, "LINE1"),
        week: text(row, "COMP_DAY"),
        line: trimmed(row, "LN_NAME"),
        itemcode: text(row, "PR"),
        item1: text(row, "ITEM"),
        item2: trimmed(row, "ITEM1"),
        plan_qty: quantity(row, "EST_PRO_QTY"),
        actual_qty: quantity(row, "ACT_PRO_QTY"),
        unit: unit(row),
        date: text(row, "COMP_DAY"),
        group: text(row, "LINE2"),
        item3: trimmed(row, "ITEM2"),
        size: trimmed(row, "SIZE"),
        qc_pass: trimmed(row, "CH"),
        note: position.map(|_| String::new()),
    }
}

/// Maps a batch of raw rows to output records.
///
/// Two business rules are re-asserted here independent of the SQL: rows
/// whose line group code is outside the six-prefix allow-list are dropped,
/// and a supplied line filter keeps only exact (post-trim) matches.
pub fn map_rows(
    rows: &[RawRow],
    include_synthetic: bool,
    line_filter: Option<&str>,
) -> Vec<ProductionRecord> {
    let line_filter = line_filter.map(str::trim);
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let area = text(row, "LINE1");
        if !ALLOWED_LINE_PREFIXES.contains(&area.trim()) {
            continue;
        }
        if let Some(filter) = line_filter {
            if trimmed(row, "LN_NAME") != filter {
                continue;
            }
        }
        let position = include_synthetic.then_some(records.len() + 1);
        records.push(map_row(row, position));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::RawRow;

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn fixture_row(line1: &str) -> RawRow {
        let mut row = RawRow::new();
        row.insert("COMP_DAY".into(), cell("20250115"));
        row.insert("LINE1".into(), cell(line1));
        row.insert("LINE2".into(), cell("01"));
        row.insert("LN_NAME".into(), cell("EXTRUDER A   "));
        row.insert("PR".into(), cell("PR0001"));
        row.insert("ITEM".into(), cell("ITM001"));
        row.insert("ITEM1".into(), cell("SUB1  "));
        row.insert("ITEM2".into(), cell("SUB2  "));
        row.insert("EST_PRO_QTY".into(), cell("120.5"));
        row.insert("ACT_PRO_QTY".into(), cell("118"));
        row.insert("UNIT".into(), cell("KG  "));
        row.insert("SIZE".into(), cell("L   "));
        row.insert("CH".into(), cell("Y "));
        row
    }

    #[test]
    fn test_map_row_renames_and_trims() {
        let record = map_row(&fixture_row("111"), Some(1));
        assert_eq!(record.id.as_deref(), Some("row-1"));
        assert_eq!(record.area, "111");
        assert_eq!(record.week, "20250115");
        assert_eq!(record.date, "20250115");
        assert_eq!(record.line, "EXTRUDER A");
        assert_eq!(record.itemcode, "PR0001");
        assert_eq!(record.item1, "ITM001");
        assert_eq!(record.item2, "SUB1");
        assert_eq!(record.item3, "SUB2");
        assert_eq!(record.plan_qty, 120.5);
        assert_eq!(record.actual_qty, 118.0);
        assert_eq!(record.unit, "KG");
        assert_eq!(record.size, "L");
        assert_eq!(record.qc_pass, "Y");
        assert_eq!(record.note.as_deref(), Some(""));
    }

    #[test]
    fn test_null_quantities_default_to_zero() {
        let mut row = fixture_row("111");
        row.insert("EST_PRO_QTY".into(), None);
        row.remove("ACT_PRO_QTY");
        let record = map_row(&row, None);
        assert_eq!(record.plan_qty, 0.0);
        assert_eq!(record.actual_qty, 0.0);
    }

    #[test]
    fn test_unit_defaults_to_kg() {
        let mut row = fixture_row("111");
        row.insert("UNIT".into(), None);
        assert_eq!(map_row(&row, None).unit, "KG");

        row.insert("UNIT".into(), cell("   "));
        assert_eq!(map_row(&row, None).unit, "KG");

        row.insert("UNIT".into(), cell("TON "));
        assert_eq!(map_row(&row, None).unit, "TON");
    }

    #[test]
    fn test_synthetic_fields_omitted_from_json() {
        let record = map_row(&fixture_row("111"), None);
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("note"));
        assert!(object.contains_key("planQty"));
        assert!(object.contains_key("qcPass"));
    }

    #[test]
    fn test_map_rows_applies_allow_list() {
        let rows = vec![fixture_row("111"), fixture_row("999")];
        let records = map_rows(&rows, true, None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("row-1"));
        assert_eq!(records[0].area, "111");
    }

    #[test]
    fn test_map_rows_line_filter_is_exact_post_trim() {
        let mut other = fixture_row("121");
        other.insert("LN_NAME".into(), cell("EXTRUDER B   "));
        let rows = vec![fixture_row("111"), other];

        let records = map_rows(&rows, false, Some("EXTRUDER B"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, "EXTRUDER B");

        assert!(map_rows(&rows, false, Some("extruder b")).is_empty());
    }

    #[test]
    fn test_synthetic_ids_are_sequential_after_filtering() {
        let rows = vec![fixture_row("999"), fixture_row("111"), fixture_row("121")];
        let records = map_rows(&rows, true, None);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("row-1"));
        assert_eq!(records[1].id.as_deref(), Some("row-2"));
    }
}
