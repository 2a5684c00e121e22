//! Weave Catalog - read-only lookup tables for the pipeline
//!
//! Two static maps built once at process start:
//! - [`SchemaCatalog`]: db_id -> schema description (tables and columns)
//! - [`DatabaseRegistry`]: db_id -> connectable SQLite file
//!
//! Both are immutable after construction and safe to share across
//! concurrent pipeline runs without synchronization.
//!
//! # Example
//!
//! ```rust,ignore
//! use weave_catalog::{SchemaCatalog, DatabaseRegistry};
//!
//! let catalog = SchemaCatalog::from_file("data/schema_info.json")?;
//! let registry = DatabaseRegistry::discover("data/database")?;
//!
//! let schema = catalog.lookup("film_db");
//! let handle = registry.resolve("film_db");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod registry;
pub mod schema;

pub use catalog::SchemaCatalog;
pub use error::CatalogError;
pub use registry::{DatabaseHandle, DatabaseRegistry};
pub use schema::{ColumnDescriptor, SchemaDescription, TableSchema};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
