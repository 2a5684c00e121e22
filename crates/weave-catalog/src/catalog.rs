//! Schema catalog
//!
//! Static db_id -> [`SchemaDescription`] map. Built once from a JSON
//! document at startup and read-only thereafter.

use crate::error::CatalogError;
use crate::schema::SchemaDescription;
use std::collections::HashMap;
use std::path::Path;

/// Read-only mapping from db_id to its schema description
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: HashMap<String, SchemaDescription>,
}

impl SchemaCatalog {
    /// Create an empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON document mapping db_id to schema
    ///
    /// Expected shape: `{"<db_id>": {"<table>": [<column>, ...], ...}, ...}`.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let schemas: HashMap<String, SchemaDescription> = serde_json::from_str(raw)?;
        tracing::debug!(databases = schemas.len(), "loaded schema catalog");
        Ok(Self { schemas })
    }

    /// Build from a JSON file on disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::SchemaRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Register a schema (programmatic construction)
    #[must_use]
    pub fn with_schema(mut self, db_id: impl Into<String>, schema: SchemaDescription) -> Self {
        self.schemas.insert(db_id.into(), schema);
        self
    }

    /// Look up the schema for a db_id
    ///
    /// Unknown db_id yields an empty description, not an error; later
    /// stages then have nothing to link against and report from there.
    #[must_use]
    pub fn lookup(&self, db_id: &str) -> SchemaDescription {
        self.schemas.get(db_id).cloned().unwrap_or_default()
    }

    /// Whether a db_id has a stored schema
    #[inline]
    #[must_use]
    pub fn contains(&self, db_id: &str) -> bool {
        self.schemas.contains_key(db_id)
    }

    /// Number of known databases
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
