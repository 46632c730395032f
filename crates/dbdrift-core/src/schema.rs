//! Catalog schema types
//!
//! A [`Catalog`] is the set of base-table column definitions read from one
//! database at one point in time. It is built once per comparison run and
//! read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One column's observable schema properties for a single table in a
/// single database, as reported by `information_schema.columns`.
///
/// A `None` field means the catalog reported SQL NULL for that property.
/// Absent is a distinct observable value: it compares equal only to
/// another absent value and unequal to any present one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Table the column belongs to
    pub table_name: String,

    /// Column name (identity key together with `table_name`)
    pub column_name: String,

    /// Engine data type (e.g. "integer", "character varying")
    pub data_type: Option<String>,

    /// Default expression, if any
    pub column_default: Option<String>,

    /// Engine-reported nullability flag ("YES"/"NO")
    pub is_nullable: String,

    /// Maximum length for character types
    pub char_max_length: Option<i32>,

    /// Precision for numeric types
    pub numeric_precision: Option<i32>,
}

impl ColumnDefinition {
    /// Create a definition with all optional properties absent and
    /// nullability "YES".
    pub fn new(table_name: impl Into<String>, column_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            data_type: None,
            column_default: None,
            is_nullable: "YES".to_string(),
            char_max_length: None,
            numeric_precision: None,
        }
    }

    /// Set the data type
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Set the default expression
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.column_default = Some(default.into());
        self
    }

    /// Set the nullability flag
    pub fn with_nullable(mut self, is_nullable: impl Into<String>) -> Self {
        self.is_nullable = is_nullable.into();
        self
    }

    /// Set the character maximum length
    pub fn with_char_max_length(mut self, len: i32) -> Self {
        self.char_max_length = Some(len);
        self
    }

    /// Set the numeric precision
    pub fn with_numeric_precision(mut self, precision: i32) -> Self {
        self.numeric_precision = Some(precision);
        self
    }
}

/// Column name to definition, for one table
pub type ColumnMap = HashMap<String, ColumnDefinition>;

/// Table name to column map, for one database
///
/// Neither mapping carries an ordering guarantee; deterministic output
/// order is imposed at the reporting boundary, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    tables: HashMap<String, ColumnMap>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a sequence of column definitions, grouping
    /// them by table name.
    pub fn from_definitions(defs: impl IntoIterator<Item = ColumnDefinition>) -> Self {
        let mut catalog = Self::new();
        for def in defs {
            catalog.insert(def);
        }
        catalog
    }

    /// Insert one column definition under its table
    pub fn insert(&mut self, def: ColumnDefinition) {
        self.tables
            .entry(def.table_name.clone())
            .or_default()
            .insert(def.column_name.clone(), def);
    }

    /// Look up the column map for a table, case-sensitive
    pub fn table(&self, name: &str) -> Option<&ColumnMap> {
        self.tables.get(name)
    }

    /// Whether the catalog contains a table, case-sensitive
    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Iterate table names in unspecified order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Iterate (table name, column map) pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnMap)> {
        self.tables.iter().map(|(name, cols)| (name.as_str(), cols))
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Whether the catalog has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
