//! Pipeline orchestrator
//!
//! Chains retrieval -> linking -> generation -> execution for the full
//! path, and generation -> execution (with an empty link set) for the
//! baseline. The two paths share no mutable state; each returns its own
//! `Result`, so a fatal error on one never blocks the other.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::stages::{
    GenerationInput, SchemaLinkingStage, SchemaRetrievalStage, SqlExecutionStage,
    SqlGenerationStage,
};
use crate::types::{PathReport, PipelineReport, QueryContext, RunId, SchemaLinkResult};
use std::sync::Arc;
use weave_catalog::{DatabaseRegistry, SchemaCatalog};
use weave_reasoning::Reasoner;

/// Drives both resolution paths over shared read-only catalogs
pub struct PipelineOrchestrator {
    retrieval: SchemaRetrievalStage,
    linking: SchemaLinkingStage,
    generation: SqlGenerationStage,
    execution: SqlExecutionStage,
    config: PipelineConfig,
}

impl PipelineOrchestrator {
    /// Create an orchestrator with default configuration
    #[must_use]
    pub fn new(
        catalog: Arc<SchemaCatalog>,
        registry: Arc<DatabaseRegistry>,
        reasoner: Arc<dyn Reasoner>,
    ) -> Self {
        Self::with_config(catalog, registry, reasoner, PipelineConfig::new())
    }

    /// Create an orchestrator with explicit configuration
    #[must_use]
    pub fn with_config(
        catalog: Arc<SchemaCatalog>,
        registry: Arc<DatabaseRegistry>,
        reasoner: Arc<dyn Reasoner>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            retrieval: SchemaRetrievalStage::new(catalog),
            linking: SchemaLinkingStage::new(reasoner.clone()),
            generation: SqlGenerationStage::new(reasoner),
            execution: SqlExecutionStage::new(registry, &config),
            config,
        }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run both paths for one question
    ///
    /// This is the single entry point. Hard failures of either path
    /// (linking parse, empty generation, reasoning transport) land in
    /// that path's `Result`; execution-level failures are data inside
    /// the path's [`ExecutionOutcome`](crate::ExecutionOutcome).
    pub async fn run(&self, context: QueryContext) -> PipelineReport {
        let run_id = RunId::new();
        tracing::info!(%run_id, db_id = %context.db_id, question = %context.question, "pipeline run started");

        let (full, baseline) = if self.config.concurrent_paths {
            tokio::join!(self.run_full(&context), self.run_baseline(&context))
        } else {
            (self.run_full(&context).await, self.run_baseline(&context).await)
        };

        match &full {
            Ok(report) => tracing::info!(%run_id, success = report.execution.is_success(), "full path finished"),
            Err(e) => tracing::warn!(%run_id, error = %e, "full path failed"),
        }
        match &baseline {
            Ok(report) => tracing::info!(%run_id, success = report.execution.is_success(), "baseline path finished"),
            Err(e) => tracing::warn!(%run_id, error = %e, "baseline path failed"),
        }

        PipelineReport {
            run_id,
            context,
            full,
            baseline,
        }
    }

    /// Full path: retrieval, linking, generation, execution
    async fn run_full(&self, context: &QueryContext) -> Result<PathReport, PipelineError> {
        let retrieved = self.retrieval.run(context);
        let link = self.linking.run(&retrieved).await?;
        let sql = self
            .generation
            .run(GenerationInput {
                context,
                link: &link,
            })
            .await?;
        let execution = self.execution.run(&sql, &context.db_id).await;

        Ok(PathReport {
            link: Some(link),
            sql,
            execution,
        })
    }

    /// Baseline path: generation with no schema knowledge, then execution
    ///
    /// Goes through the same generation contract as the full path, just
    /// with an empty link set, so the comparison isolates exactly what
    /// schema linking adds.
    async fn run_baseline(&self, context: &QueryContext) -> Result<PathReport, PipelineError> {
        let link = SchemaLinkResult::empty();
        let sql = self
            .generation
            .run(GenerationInput {
                context,
                link: &link,
            })
            .await?;
        let execution = self.execution.run(&sql, &context.db_id).await;

        Ok(PathReport {
            link: None,
            sql,
            execution,
        })
    }
}

impl std::fmt::Debug for PipelineOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineOrchestrator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_reasoning::ScriptedReasoner;

    fn orchestrator(replies: Vec<&str>) -> PipelineOrchestrator {
        // Sequential paths so scripted replies land in a fixed order:
        // linking, full-path generation, baseline generation.
        PipelineOrchestrator::with_config(
            Arc::new(SchemaCatalog::new()),
            Arc::new(DatabaseRegistry::new()),
            Arc::new(ScriptedReasoner::new(replies)),
            PipelineConfig::new().with_concurrent_paths(false),
        )
    }

    #[tokio::test]
    async fn empty_catalog_and_registry_still_complete() {
        // Empty schema: linking short-circuits, so only two generation calls.
        let orchestrator = orchestrator(vec!["SELECT 1", "SELECT 1"]);
        let report = orchestrator
            .run(QueryContext::new("q", "missing_db", "t"))
            .await;

        let full = report.full.unwrap();
        assert_eq!(full.link, Some(SchemaLinkResult::empty()));
        assert_eq!(
            full.execution.error(),
            Some("no database found for db_id=missing_db")
        );

        let baseline = report.baseline.unwrap();
        assert_eq!(baseline.link, None);
        assert!(!baseline.execution.is_success());
    }

    #[tokio::test]
    async fn context_is_returned_unchanged() {
        let orchestrator = orchestrator(vec!["SELECT 1", "SELECT 1"]);
        let context = QueryContext::new("q", "missing_db", "aggregation");
        let report = orchestrator.run(context.clone()).await;
        assert_eq!(report.context, context);
    }
}
