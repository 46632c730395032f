//! dbdrift comparison engine
//!
//! Computes the structural drift between two database catalogs: tables
//! present on one side only, and column-level definition mismatches for
//! tables present on both.

pub mod compare;

pub use compare::{compare_catalogs, compare_columns, compare_databases};
