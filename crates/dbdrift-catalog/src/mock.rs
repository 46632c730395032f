//! In-memory catalog source for testing
//!
//! Returns a prebuilt catalog, or a configured error, without touching a
//! database. Used by the engine tests and useful for demos without real
//! credentials.

use crate::source::{CatalogError, CatalogSource};
use dbdrift_core::{Catalog, ColumnDefinition};

/// Catalog source backed by an in-memory catalog
#[derive(Debug, Clone)]
pub struct MockCatalog {
    name: String,
    outcome: Result<Catalog, CatalogError>,
}

impl MockCatalog {
    /// Create an empty mock source
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Ok(Catalog::new()),
        }
    }

    /// Create a mock source over an existing catalog
    pub fn with_catalog(name: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            name: name.into(),
            outcome: Ok(catalog),
        }
    }

    /// Create a mock source whose read always fails
    pub fn failing(name: impl Into<String>, error: CatalogError) -> Self {
        Self {
            name: name.into(),
            outcome: Err(error),
        }
    }

    /// Add a table with the given column definitions
    pub fn with_table(mut self, columns: Vec<ColumnDefinition>) -> Self {
        if let Ok(catalog) = &mut self.outcome {
            for def in columns {
                catalog.insert(def);
            }
        }
        self
    }
}

#[async_trait::async_trait]
impl CatalogSource for MockCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_catalog(&self) -> Result<Catalog, CatalogError> {
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_prebuilt_catalog() {
        let source = MockCatalog::new("DB1").with_table(vec![
            ColumnDefinition::new("users", "id").with_data_type("integer"),
            ColumnDefinition::new("users", "email").with_data_type("text"),
        ]);

        let catalog = source.read_catalog().await.unwrap();
        assert_eq!(source.name(), "DB1");
        assert_eq!(catalog.table_count(), 1);
        assert_eq!(catalog.table("users").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failing_source_surfaces_configured_error() {
        let source = MockCatalog::failing(
            "DB2",
            CatalogError::Query("relation does not exist".to_string()),
        );

        let err = source.read_catalog().await.unwrap_err();
        assert!(matches!(err, CatalogError::Query(_)));
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let source = MockCatalog::new("DB1")
            .with_table(vec![ColumnDefinition::new("orders", "id")]);

        let first = source.read_catalog().await.unwrap();
        let second = source.read_catalog().await.unwrap();
        assert_eq!(first, second);
    }
}
