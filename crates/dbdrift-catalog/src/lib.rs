//! Catalog sources for drift detection
//!
//! A catalog source reads the base-table/column metadata of one database
//! into an in-memory [`dbdrift_core::Catalog`]. The comparison engine only
//! sees the [`CatalogSource`] trait, so tests can substitute an in-memory
//! source for a live connection.

pub mod mock;
pub mod postgres;
pub mod source;

pub use mock::MockCatalog;
pub use postgres::PostgresCatalog;
pub use source::{CatalogError, CatalogSource};
