//! Schema retrieval stage
//!
//! Pure catalog lookup: enriches the query context with its schema
//! description. Never fails - an unknown db_id degrades to an empty
//! schema so a later stage can report a clearer error.

use crate::types::QueryContext;
use std::sync::Arc;
use weave_catalog::{SchemaCatalog, SchemaDescription};

/// Context enriched with its schema
#[derive(Debug, Clone)]
pub struct RetrievedSchema {
    /// Invariant context, unchanged
    pub context: QueryContext,
    /// Schema for `context.db_id`; empty when the catalog has none
    pub schema: SchemaDescription,
}

/// Stage 1: look up the schema for the target database
#[derive(Debug, Clone)]
pub struct SchemaRetrievalStage {
    catalog: Arc<SchemaCatalog>,
}

impl SchemaRetrievalStage {
    /// Create the stage over a shared catalog
    #[inline]
    #[must_use]
    pub fn new(catalog: Arc<SchemaCatalog>) -> Self {
        Self { catalog }
    }

    /// Run the lookup
    #[must_use]
    pub fn run(&self, context: &QueryContext) -> RetrievedSchema {
        let schema = self.catalog.lookup(&context.db_id);
        if schema.is_empty() {
            tracing::debug!(db_id = %context.db_id, "no schema in catalog, passing empty description");
        }
        RetrievedSchema {
            context: context.clone(),
            schema,
        }
    }
}
