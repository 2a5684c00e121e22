//! Weave Pipeline - staged natural-language-to-SQL resolution
//!
//! A fixed-topology chain of four stages:
//! - Schema retrieval: enrich the question with the catalog schema
//! - Schema linking: narrow the schema to relevant tables/columns
//! - SQL generation: produce one SQL statement
//! - SQL execution: run it against the registered SQLite file
//!
//! The orchestrator drives the full chain and, independently, a
//! baseline path that skips schema linking - the comparison point for
//! measuring what linking adds.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use weave_catalog::{DatabaseRegistry, SchemaCatalog};
//! use weave_pipeline::{PipelineOrchestrator, QueryContext};
//! use weave_reasoning::{HttpReasoner, HttpReasonerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(SchemaCatalog::from_file("data/schema_info.json")?);
//! let registry = Arc::new(DatabaseRegistry::discover("data/database")?);
//! let reasoner = Arc::new(HttpReasoner::new(HttpReasonerConfig::new(
//!     "https://api.openai.com/v1",
//!     "gpt-4o-mini",
//!     std::env::var("OPENAI_API_KEY")?,
//! )));
//!
//! let orchestrator = PipelineOrchestrator::new(catalog, registry, reasoner);
//! let report = orchestrator
//!     .run(QueryContext::new("Which films came out in 2016?", "film_db", "comparison"))
//!     .await;
//!
//! println!("full: {:?}", report.full);
//! println!("baseline: {:?}", report.baseline);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod stages;
pub mod types;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use orchestrator::PipelineOrchestrator;
pub use stages::{
    GenerationInput, RetrievedSchema, SchemaLinkingStage, SchemaRetrievalStage,
    SqlExecutionStage, SqlGenerationStage,
};
pub use types::{
    CellValue, ExecutionOutcome, PathReport, PipelineReport, QueryContext, Row, RunId,
    SchemaLinkResult, SqlQuery,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the pipeline
    pub use crate::{
        ExecutionOutcome, PipelineConfig, PipelineError, PipelineOrchestrator, PipelineReport,
        QueryContext, SchemaLinkResult, SqlQuery,
    };
    pub use weave_catalog::{DatabaseRegistry, SchemaCatalog};
    pub use weave_reasoning::Reasoner;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
