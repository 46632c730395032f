//! PostgreSQL catalog source backed by information_schema
//!
//! Issues one metadata query per catalog read, restricted to user base
//! tables in the public schema. Works with PostgreSQL 9.4+ and
//! PostgreSQL-compatible engines that expose the standard
//! information_schema views.
//!
//! Reference: https://www.postgresql.org/docs/current/information-schema-columns.html

use crate::source::{CatalogError, CatalogSource};
use dbdrift_core::{Catalog, ColumnDefinition, DbConfig};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::types::FromSqlOwned;
use tokio_postgres::{Client, NoTls, Row};

/// One metadata query covers the whole catalog. Rows come back ordered by
/// table name so downstream assembly is deterministic where order matters.
/// The information_schema views type their columns through SQL domains
/// (sql_identifier, cardinal_number), so every cell is cast to a
/// driver-native type.
const CATALOG_QUERY: &str = "\
    SELECT \
        c.table_name::text, c.column_name::text, c.data_type::text, \
        c.column_default::text, c.is_nullable::text, \
        c.character_maximum_length::int, c.numeric_precision::int \
    FROM information_schema.tables t \
    INNER JOIN information_schema.columns c ON t.table_name = c.table_name \
    WHERE t.table_schema = 'public' AND t.table_type = 'BASE TABLE' \
    ORDER BY c.table_name ASC";

/// Catalog source for one live PostgreSQL database
pub struct PostgresCatalog {
    name: String,
    client: Client,
}

impl PostgresCatalog {
    /// Connect without TLS.
    ///
    /// The connection task is spawned in the background; connection-level
    /// failures after startup surface as query errors on the next read.
    pub async fn connect(config: &DbConfig) -> Result<Self, CatalogError> {
        let (client, connection) = tokio_postgres::connect(&config.dsn(), NoTls)
            .await
            .map_err(|e| {
                CatalogError::Connection(format!(
                    "{} at {}:{}: {}",
                    config.name, config.host, config.port, e
                ))
            })?;

        let name = config.name.clone();
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("postgres connection error ({}): {}", name, e);
            }
        });

        Ok(Self {
            name: config.name.clone(),
            client,
        })
    }

    /// Connect with TLS via native-tls
    pub async fn connect_tls(config: &DbConfig) -> Result<Self, CatalogError> {
        let connector = TlsConnector::builder()
            .build()
            .map_err(|e| CatalogError::Tls(e.to_string()))?;
        let tls = MakeTlsConnector::new(connector);

        let (client, connection) =
            tokio_postgres::connect(&config.dsn(), tls)
                .await
                .map_err(|e| {
                    CatalogError::Connection(format!(
                        "{} at {}:{} with TLS: {}",
                        config.name, config.host, config.port, e
                    ))
                })?;

        let name = config.name.clone();
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("postgres TLS connection error ({}): {}", name, e);
            }
        });

        Ok(Self {
            name: config.name.clone(),
            client,
        })
    }

    /// Cheap connectivity probe, useful before a long comparison
    pub async fn test_connection(&self) -> Result<(), CatalogError> {
        self.client
            .query("SELECT 1", &[])
            .await
            .map(|_| ())
            .map_err(|e| CatalogError::Query(format!("connection test failed: {}", e)))
    }
}

/// Scan one catalog cell, turning driver type mismatches into a
/// descriptive error instead of a panic.
fn scan<T: FromSqlOwned>(row: &Row, idx: usize, column: &'static str) -> Result<T, CatalogError> {
    row.try_get(idx).map_err(|e| CatalogError::Scan {
        column,
        message: e.to_string(),
    })
}

fn definition_from_row(row: &Row) -> Result<ColumnDefinition, CatalogError> {
    Ok(ColumnDefinition {
        table_name: scan(row, 0, "table_name")?,
        column_name: scan(row, 1, "column_name")?,
        data_type: scan(row, 2, "data_type")?,
        column_default: scan(row, 3, "column_default")?,
        is_nullable: scan(row, 4, "is_nullable")?,
        char_max_length: scan(row, 5, "character_maximum_length")?,
        numeric_precision: scan(row, 6, "numeric_precision")?,
    })
}

#[async_trait::async_trait]
impl CatalogSource for PostgresCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_catalog(&self) -> Result<Catalog, CatalogError> {
        let rows = self
            .client
            .query(CATALOG_QUERY, &[])
            .await
            .map_err(|e| CatalogError::Query(e.to_string()))?;

        let mut catalog = Catalog::new();
        for row in &rows {
            catalog.insert(definition_from_row(row)?);
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_query_targets_public_base_tables() {
        assert!(CATALOG_QUERY.contains("table_schema = 'public'"));
        assert!(CATALOG_QUERY.contains("table_type = 'BASE TABLE'"));
        assert!(CATALOG_QUERY.contains("ORDER BY c.table_name ASC"));
    }

    #[test]
    fn catalog_query_selects_all_compared_properties() {
        for column in [
            "c.table_name::text",
            "c.column_name::text",
            "c.data_type::text",
            "c.column_default::text",
            "c.is_nullable::text",
            "c.character_maximum_length::int",
            "c.numeric_precision::int",
        ] {
            assert!(CATALOG_QUERY.contains(column), "missing {column}");
        }
    }
}
