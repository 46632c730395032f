//! Comparison result types
//!
//! [`ComparisonResult`] is the terminal value of a comparison run. It is
//! assembled once by the engine and never mutated afterwards; the report
//! layer only reads it.

use crate::schema::ColumnDefinition;
use serde::{Deserialize, Serialize};

/// One side of an aligned diff pair.
///
/// `Absent` stands for "this column does not exist on this side" so a
/// diff pair always has two sides to render. How an absent side displays
/// is the report layer's decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DiffSide {
    Present(ColumnDefinition),
    Absent,
}

impl DiffSide {
    /// The column definition, if this side has one
    pub fn definition(&self) -> Option<&ColumnDefinition> {
        match self {
            Self::Present(def) => Some(def),
            Self::Absent => None,
        }
    }

    /// Whether this side is absent
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// One aligned (left, right) pair of column definitions for a table that
/// exists in both catalogs. At least one side is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDiffPair {
    /// Table both sides belong to
    pub table_name: String,

    /// Definition in the left database, or absent
    pub left: DiffSide,

    /// Definition in the right database, or absent
    pub right: DiffSide,
}

impl ColumnDiffPair {
    /// The column name this pair is about, taken from whichever side is
    /// present (the left side when both are).
    pub fn column_name(&self) -> &str {
        self.left
            .definition()
            .or_else(|| self.right.definition())
            .map(|def| def.column_name.as_str())
            .unwrap_or_default()
    }

    /// Whether the column exists on exactly one side
    pub fn is_one_sided(&self) -> bool {
        self.left.is_absent() || self.right.is_absent()
    }
}

/// The immutable outcome of comparing two catalogs.
///
/// Missing-table lists are strict set differences of the two catalogs'
/// table name sets; a table name appears in at most one of them. The two
/// lists are independent enumerations and are never positionally paired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Tables present in the right catalog but absent from the left
    pub missing_in_left: Vec<String>,

    /// Tables present in the left catalog but absent from the right
    pub missing_in_right: Vec<String>,

    /// Column-level differences for tables present in both catalogs,
    /// sorted by table name then column name
    pub column_diffs: Vec<ColumnDiffPair>,
}

impl ComparisonResult {
    /// Whether any difference was detected
    pub fn has_drift(&self) -> bool {
        !self.missing_in_left.is_empty()
            || !self.missing_in_right.is_empty()
            || !self.column_diffs.is_empty()
    }

    /// Total number of detected differences
    pub fn drift_count(&self) -> usize {
        self.missing_in_left.len() + self.missing_in_right.len() + self.column_diffs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_column_name_prefers_left() {
        let pair = ColumnDiffPair {
            table_name: "users".to_string(),
            left: DiffSide::Present(ColumnDefinition::new("users", "email")),
            right: DiffSide::Present(ColumnDefinition::new("users", "email")),
        };
        assert_eq!(pair.column_name(), "email");
        assert!(!pair.is_one_sided());
    }

    #[test]
    fn pair_column_name_falls_back_to_right() {
        let pair = ColumnDiffPair {
            table_name: "users".to_string(),
            left: DiffSide::Absent,
            right: DiffSide::Present(ColumnDefinition::new("users", "phone")),
        };
        assert_eq!(pair.column_name(), "phone");
        assert!(pair.is_one_sided());
    }

    #[test]
    fn empty_result_has_no_drift() {
        let result = ComparisonResult::default();
        assert!(!result.has_drift());
        assert_eq!(result.drift_count(), 0);
    }

    #[test]
    fn result_serde_roundtrip() {
        let result = ComparisonResult {
            missing_in_left: vec!["audit_log".to_string()],
            missing_in_right: vec![],
            column_diffs: vec![ColumnDiffPair {
                table_name: "users".to_string(),
                left: DiffSide::Present(ColumnDefinition::new("users", "email")),
                right: DiffSide::Absent,
            }],
        };

        let json = serde_json::to_string(&result).unwrap();
        let parsed: ComparisonResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, parsed);
    }
}
