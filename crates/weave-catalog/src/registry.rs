//! Database registry
//!
//! Static db_id -> connectable SQLite file map, discovered from a
//! directory layout of one subdirectory per db_id. Built once at
//! startup and read-only thereafter; connections are opened lazily by
//! the execution stage, never held here.

use crate::error::CatalogError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Recognized database file extensions, in preference order
///
/// `<db_id>.sqlite` wins over `<db_id>.db` when both exist.
const EXTENSIONS: [&str; 2] = ["sqlite", "db"];

/// A connectable resource for one db_id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHandle {
    /// Database identifier
    pub db_id: String,
    /// Path to the SQLite file
    pub path: PathBuf,
}

impl DatabaseHandle {
    /// Create a handle
    #[inline]
    #[must_use]
    pub fn new(db_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            db_id: db_id.into(),
            path: path.into(),
        }
    }
}

/// Read-only mapping from db_id to its database handle
#[derive(Debug, Clone, Default)]
pub struct DatabaseRegistry {
    handles: HashMap<String, DatabaseHandle>,
}

impl DatabaseRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover databases under a base directory
    ///
    /// Each subdirectory of `base_dir` names one db_id and is expected
    /// to contain `<db_id>.sqlite` or `<db_id>.db`. Subdirectories with
    /// neither file are skipped. Exactly one handle is kept per db_id,
    /// chosen by extension preference order.
    pub fn discover(base_dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let base_dir = base_dir.as_ref();
        let entries = std::fs::read_dir(base_dir).map_err(|source| CatalogError::RegistryScan {
            path: base_dir.to_path_buf(),
            source,
        })?;

        let mut handles = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|source| CatalogError::RegistryScan {
                path: base_dir.to_path_buf(),
                source,
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            let db_id = entry.file_name().to_string_lossy().into_owned();

            for ext in EXTENSIONS {
                let candidate = entry.path().join(format!("{db_id}.{ext}"));
                if candidate.is_file() {
                    handles.insert(db_id.clone(), DatabaseHandle::new(&db_id, candidate));
                    break;
                }
            }
        }

        tracing::debug!(databases = handles.len(), "discovered database registry");
        Ok(Self { handles })
    }

    /// Register a handle (programmatic construction)
    #[must_use]
    pub fn with_handle(mut self, handle: DatabaseHandle) -> Self {
        self.handles.insert(handle.db_id.clone(), handle);
        self
    }

    /// Resolve the handle for a db_id, if one exists
    #[inline]
    #[must_use]
    pub fn resolve(&self, db_id: &str) -> Option<&DatabaseHandle> {
        self.handles.get(db_id)
    }

    /// Known db_ids, in no particular order
    pub fn db_ids(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    /// Number of registered databases
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
