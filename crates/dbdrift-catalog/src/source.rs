//! Catalog source trait and error taxonomy

use dbdrift_core::Catalog;

/// Errors that can occur while provisioning a connection or reading a
/// catalog. Every variant is fatal to the comparison that triggered it;
/// no partial catalog is ever returned.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("catalog query failed: {0}")]
    Query(String),

    #[error("cannot decode catalog column '{column}': {message}")]
    Scan {
        column: &'static str,
        message: String,
    },

    #[error("TLS setup failed: {0}")]
    Tls(String),
}

/// A source of one database's schema catalog.
///
/// Implementations issue a single read-only metadata query per call and
/// return the complete normalized catalog, or an error. They must never
/// mutate database state.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Display name for status output and report headers
    fn name(&self) -> &str;

    /// Read the full catalog of user base tables in the public schema
    async fn read_catalog(&self) -> Result<Catalog, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = CatalogError::Scan {
            column: "numeric_precision",
            message: "unexpected type".to_string(),
        };
        assert!(err.to_string().contains("numeric_precision"));

        let err = CatalogError::Query("connection reset".to_string());
        assert!(err.to_string().contains("catalog query failed"));
    }
}
