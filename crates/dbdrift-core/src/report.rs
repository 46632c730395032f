//! Report rendering for comparison results
//!
//! The engine hands over one immutable [`ComparisonResult`]; this module
//! turns it into a delimited-text or JSON document. Presentation is the
//! whole job here, the result itself is never reinterpreted.

use crate::diff::{ComparisonResult, DiffSide};
use serde::{Deserialize, Serialize};

/// Summary statistics for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Tables absent from the left database
    pub missing_in_left: usize,

    /// Tables absent from the right database
    pub missing_in_right: usize,

    /// Column-level diff pairs
    pub column_diffs: usize,

    /// Total number of differences
    pub total: usize,
}

/// A rendered comparison report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Display name of the left database
    pub left: String,

    /// Display name of the right database
    pub right: String,

    /// Summary statistics
    pub summary: ReportSummary,

    /// The full comparison result
    pub result: ComparisonResult,
}

impl Report {
    /// Wrap a comparison result with names and summary counts
    pub fn new(
        result: ComparisonResult,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        let summary = ReportSummary {
            missing_in_left: result.missing_in_left.len(),
            missing_in_right: result.missing_in_right.len(),
            column_diffs: result.column_diffs.len(),
            total: result.drift_count(),
        };

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            left: left.into(),
            right: right.into(),
            summary,
            result,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render as delimited text.
    ///
    /// One record per column diff pair, with the two missing-table lists
    /// enumerated independently in their own columns. The lists may have
    /// unequal lengths; short columns are padded with blank cells rather
    /// than paired positionally.
    pub fn to_csv(&self) -> String {
        let mut rows: Vec<Vec<String>> = Vec::new();

        rows.push(vec![
            format!("Database 1 ({})", self.left),
            format!("Database 2 ({})", self.right),
            String::new(),
            String::new(),
            format!("Tables missing in {}", self.left),
            format!("Tables missing in {}", self.right),
        ]);

        let record_count = self
            .result
            .column_diffs
            .len()
            .max(self.result.missing_in_left.len())
            .max(self.result.missing_in_right.len());

        for i in 0..record_count {
            let (left_cell, right_cell) = match self.result.column_diffs.get(i) {
                Some(pair) => (describe_side(&pair.left), describe_side(&pair.right)),
                None => (String::new(), String::new()),
            };

            rows.push(vec![
                left_cell,
                right_cell,
                String::new(),
                String::new(),
                self.result.missing_in_left.get(i).cloned().unwrap_or_default(),
                self.result.missing_in_right.get(i).cloned().unwrap_or_default(),
            ]);
        }

        let mut out = String::new();
        for row in rows {
            let line: Vec<String> = row.iter().map(|cell| csv_escape(cell)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }
}

/// Flatten one diff side into a single cell
fn describe_side(side: &DiffSide) -> String {
    match side {
        DiffSide::Absent => "(absent)".to_string(),
        DiffSide::Present(def) => format!(
            "table: {} | column: {} | type: {} | default: {} | nullable: {} | char max len: {} | numeric precision: {}",
            def.table_name,
            def.column_name,
            fmt_opt_str(&def.data_type),
            fmt_opt_str(&def.column_default),
            def.is_nullable,
            fmt_opt_int(def.char_max_length),
            fmt_opt_int(def.numeric_precision),
        ),
    }
}

fn fmt_opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

fn fmt_opt_int(value: Option<i32>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

/// Quote a cell when it contains a delimiter, quote or newline
fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ColumnDiffPair;
    use crate::schema::ColumnDefinition;

    fn sample_result() -> ComparisonResult {
        ComparisonResult {
            missing_in_left: vec!["audit_log".to_string(), "sessions".to_string()],
            missing_in_right: vec!["invoices".to_string()],
            column_diffs: vec![ColumnDiffPair {
                table_name: "users".to_string(),
                left: DiffSide::Present(
                    ColumnDefinition::new("users", "email")
                        .with_data_type("character varying")
                        .with_char_max_length(255),
                ),
                right: DiffSide::Absent,
            }],
        }
    }

    #[test]
    fn summary_counts() {
        let report = Report::new(sample_result(), "prod", "staging");
        assert_eq!(report.summary.missing_in_left, 2);
        assert_eq!(report.summary.missing_in_right, 1);
        assert_eq!(report.summary.column_diffs, 1);
        assert_eq!(report.summary.total, 4);
    }

    #[test]
    fn csv_header_names_both_databases() {
        let report = Report::new(sample_result(), "prod", "staging");
        let csv = report.to_csv();
        let header = csv.lines().next().unwrap();

        assert!(header.contains("Database 1 (prod)"));
        assert!(header.contains("Database 2 (staging)"));
        assert!(header.contains("Tables missing in prod"));
        assert!(header.contains("Tables missing in staging"));
    }

    #[test]
    fn csv_pads_unequal_missing_table_lists() {
        let report = Report::new(sample_result(), "prod", "staging");
        let csv = report.to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        // Header plus max(1 diff, 2 missing-left, 1 missing-right) records
        assert_eq!(lines.len(), 3);

        // Second record carries only the longer missing-table list
        let cells: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(cells[0], "");
        assert_eq!(cells[4], "sessions");
        assert_eq!(cells[5], "");
    }

    #[test]
    fn csv_escapes_delimiters_in_defaults() {
        let result = ComparisonResult {
            missing_in_left: vec![],
            missing_in_right: vec![],
            column_diffs: vec![ColumnDiffPair {
                table_name: "t".to_string(),
                left: DiffSide::Present(
                    ColumnDefinition::new("t", "c").with_default("'a,b'::text"),
                ),
                right: DiffSide::Absent,
            }],
        };

        let report = Report::new(result, "a", "b");
        let csv = report.to_csv();
        assert!(csv.contains("\"table: t"));
    }

    #[test]
    fn absent_side_renders_as_placeholder() {
        let report = Report::new(sample_result(), "a", "b");
        let csv = report.to_csv();
        assert!(csv.contains("(absent)"));
    }

    #[test]
    fn json_report_embeds_result() {
        let report = Report::new(sample_result(), "prod", "staging");
        let json = report.to_json().unwrap();

        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"missing_in_left\""));
        assert!(json.contains("audit_log"));

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.result, report.result);
    }
}
