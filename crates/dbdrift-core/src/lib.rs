//! dbdrift core
//!
//! Domain model shared by the catalog readers, the comparison engine and
//! the CLI: column definitions, catalogs, diff pairs, configuration and
//! report rendering.

pub mod config;
pub mod diff;
pub mod report;
pub mod schema;

pub use config::{Config, ConfigError, DbConfig};
pub use diff::{ColumnDiffPair, ComparisonResult, DiffSide};
pub use report::{Report, ReportSummary};
pub use schema::{Catalog, ColumnDefinition, ColumnMap};
