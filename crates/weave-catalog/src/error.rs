//! Error types for catalog construction
//!
//! Lookup never fails; only building the catalogs from external
//! sources (schema JSON, database directory) can.

use std::path::PathBuf;

/// Catalog construction errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Schema source could not be read
    #[error("failed to read schema source {path}: {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema source is not the expected JSON document
    #[error("failed to parse schema source: {0}")]
    SchemaParse(#[from] serde_json::Error),

    /// Database base directory could not be scanned
    #[error("failed to scan database directory {path}: {source}")]
    RegistryScan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_display() {
        let err = CatalogError::SchemaRead {
            path: PathBuf::from("/missing/schema.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/missing/schema.json"));
    }
}
