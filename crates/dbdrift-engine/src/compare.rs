//! Catalog comparison
//!
//! Pure map/set arithmetic over two catalogs. Map iteration order is
//! never a correctness dependency; sorting happens once, on the final
//! result, so reports come out deterministic.

use dbdrift_catalog::{CatalogError, CatalogSource};
use dbdrift_core::{Catalog, ColumnDefinition, ColumnDiffPair, ColumnMap, ComparisonResult, DiffSide};

/// Field-by-field equality over the compared tuple. Absent properties are
/// equal only to other absent properties.
fn fields_match(a: &ColumnDefinition, b: &ColumnDefinition) -> bool {
    a.column_name == b.column_name
        && a.char_max_length == b.char_max_length
        && a.column_default == b.column_default
        && a.data_type == b.data_type
        && a.is_nullable == b.is_nullable
        && a.numeric_precision == b.numeric_precision
}

/// Compare the column maps of one table that exists in both catalogs,
/// appending a diff pair for every mismatched or one-sided column.
///
/// Columns identical on both sides produce no entry, so the output stays
/// proportional to actual drift.
pub fn compare_columns(
    table_name: &str,
    left_cols: &ColumnMap,
    right_cols: &ColumnMap,
    diffs: &mut Vec<ColumnDiffPair>,
) {
    for (column_name, left_def) in left_cols {
        match right_cols.get(column_name) {
            None => diffs.push(ColumnDiffPair {
                table_name: table_name.to_string(),
                left: DiffSide::Present(left_def.clone()),
                right: DiffSide::Absent,
            }),
            Some(right_def) => {
                if !fields_match(left_def, right_def) {
                    diffs.push(ColumnDiffPair {
                        table_name: table_name.to_string(),
                        left: DiffSide::Present(left_def.clone()),
                        right: DiffSide::Present(right_def.clone()),
                    });
                }
            }
        }
    }

    for (column_name, right_def) in right_cols {
        if !left_cols.contains_key(column_name) {
            diffs.push(ColumnDiffPair {
                table_name: table_name.to_string(),
                left: DiffSide::Absent,
                right: DiffSide::Present(right_def.clone()),
            });
        }
    }
}

/// Compare two complete catalogs.
///
/// The missing-table lists are the strict set differences of the table
/// name sets: a table present in the left catalog but absent from the
/// right is "missing in right", and symmetrically. Table identity is a
/// case-sensitive exact match; no normalization is applied.
pub fn compare_catalogs(left: &Catalog, right: &Catalog) -> ComparisonResult {
    let mut missing_in_left = Vec::new();
    let mut missing_in_right = Vec::new();
    let mut column_diffs = Vec::new();

    for (table_name, left_cols) in left.iter() {
        match right.table(table_name) {
            None => missing_in_right.push(table_name.to_string()),
            Some(right_cols) => {
                compare_columns(table_name, left_cols, right_cols, &mut column_diffs);
            }
        }
    }

    for table_name in right.table_names() {
        if !left.contains_table(table_name) {
            missing_in_left.push(table_name.to_string());
        }
    }

    missing_in_left.sort_unstable();
    missing_in_right.sort_unstable();
    column_diffs.sort_by(|a, b| {
        (a.table_name.as_str(), a.column_name()).cmp(&(b.table_name.as_str(), b.column_name()))
    });

    ComparisonResult {
        missing_in_left,
        missing_in_right,
        column_diffs,
    }
}

/// Read both catalogs and compare them.
///
/// The two reads are independent and run concurrently as a latency
/// optimization; a failure in either aborts the comparison before any
/// result is assembled. All-or-nothing: no partial result exists.
pub async fn compare_databases(
    left: &dyn CatalogSource,
    right: &dyn CatalogSource,
) -> Result<ComparisonResult, CatalogError> {
    let (left_catalog, right_catalog) =
        tokio::try_join!(left.read_catalog(), right.read_catalog())?;

    Ok(compare_catalogs(&left_catalog, &right_catalog))
}
