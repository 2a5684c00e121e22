//! SQL generation stage
//!
//! Asks the reasoner for one SQL statement. The reply is taken as-is
//! after fence-stripping and trimming - no syntax validation, since
//! execution is where real error detail lives. The one contract: an
//! empty reply fails with [`PipelineError::GenerationEmpty`].

use crate::error::PipelineError;
use crate::stages::strip_code_fence;
use crate::types::{QueryContext, SchemaLinkResult, SqlQuery};
use std::fmt::Write as _;
use std::sync::Arc;
use weave_reasoning::Reasoner;

/// Input to SQL generation
///
/// The baseline path passes an empty link set here; the stage contract
/// is the same either way.
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'a> {
    /// Invariant context
    pub context: &'a QueryContext,
    /// Linked schema subset, possibly empty
    pub link: &'a SchemaLinkResult,
}

/// Stage 3: produce one SQL statement
#[derive(Clone)]
pub struct SqlGenerationStage {
    reasoner: Arc<dyn Reasoner>,
}

impl SqlGenerationStage {
    /// Create the stage over a shared reasoner
    #[inline]
    #[must_use]
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self { reasoner }
    }

    /// Run generation
    pub async fn run(&self, input: GenerationInput<'_>) -> Result<SqlQuery, PipelineError> {
        let instruction = build_instruction(input);
        let reply = self.reasoner.complete(&instruction).await?;

        let sql = strip_code_fence(&reply);
        if sql.is_empty() {
            return Err(PipelineError::GenerationEmpty);
        }

        tracing::debug!(db_id = %input.context.db_id, sql, "sql generated");
        Ok(SqlQuery::new(sql))
    }
}

impl std::fmt::Debug for SqlGenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlGenerationStage").finish_non_exhaustive()
    }
}

fn build_instruction(input: GenerationInput<'_>) -> String {
    let mut instruction = format!(
        "Write one SQLite query answering the question against database `{}`. \
         Reply with the SQL statement only, no commentary.\n",
        input.context.db_id,
    );

    if !input.link.is_empty() {
        let tables: Vec<&str> = input.link.linked_tables.iter().map(String::as_str).collect();
        let columns: Vec<&str> = input.link.linked_columns.iter().map(String::as_str).collect();
        let _ = writeln!(instruction, "Relevant tables: {}", tables.join(", "));
        let _ = writeln!(instruction, "Relevant columns: {}", columns.join(", "));
    }

    let _ = write!(instruction, "Question: {}", input.context.question);
    instruction
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_reasoning::{MockReasoner, ScriptedReasoner};

    fn context() -> QueryContext {
        QueryContext::new("Which films came out in 2016?", "film_db", "comparison")
    }

    fn linked() -> SchemaLinkResult {
        let mut link = SchemaLinkResult::empty();
        link.linked_tables.insert("films".to_string());
        link.linked_columns.insert("title".to_string());
        link.linked_columns.insert("year".to_string());
        link
    }

    #[tokio::test]
    async fn returns_reply_as_sql() {
        let reasoner = Arc::new(ScriptedReasoner::new([
            "SELECT title FROM films WHERE year = 2016",
        ]));
        let stage = SqlGenerationStage::new(reasoner);
        let context = context();
        let link = linked();

        let sql = stage
            .run(GenerationInput {
                context: &context,
                link: &link,
            })
            .await
            .unwrap();
        assert_eq!(sql.as_str(), "SELECT title FROM films WHERE year = 2016");
    }

    #[tokio::test]
    async fn strips_sql_fence() {
        let reasoner = Arc::new(ScriptedReasoner::new([
            "```sql\nSELECT 1\n```",
        ]));
        let stage = SqlGenerationStage::new(reasoner);
        let context = context();
        let link = SchemaLinkResult::empty();

        let sql = stage
            .run(GenerationInput {
                context: &context,
                link: &link,
            })
            .await
            .unwrap();
        assert_eq!(sql.as_str(), "SELECT 1");
    }

    #[tokio::test]
    async fn empty_reply_is_generation_empty() {
        let reasoner = Arc::new(ScriptedReasoner::new([""]));
        let stage = SqlGenerationStage::new(reasoner);
        let context = context();
        let link = SchemaLinkResult::empty();

        let err = stage
            .run(GenerationInput {
                context: &context,
                link: &link,
            })
            .await
            .unwrap_err();
        assert!(err.is_generation_empty());
    }

    #[tokio::test]
    async fn whitespace_reply_is_generation_empty() {
        let reasoner = Arc::new(ScriptedReasoner::new(["  \n\t  "]));
        let stage = SqlGenerationStage::new(reasoner);
        let context = context();
        let link = SchemaLinkResult::empty();

        let err = stage
            .run(GenerationInput {
                context: &context,
                link: &link,
            })
            .await
            .unwrap_err();
        assert!(err.is_generation_empty());
    }

    #[tokio::test]
    async fn linked_subset_reaches_instruction() {
        let mut mock = MockReasoner::new();
        mock.expect_complete()
            .withf(|instruction: &str| {
                instruction.contains("Relevant tables: films")
                    && instruction.contains("Relevant columns: title, year")
            })
            .returning(|_| Ok("SELECT 1".to_string()));
        let stage = SqlGenerationStage::new(Arc::new(mock));
        let context = context();
        let link = linked();

        stage
            .run(GenerationInput {
                context: &context,
                link: &link,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_link_omits_schema_lines() {
        let mut mock = MockReasoner::new();
        mock.expect_complete()
            .withf(|instruction: &str| !instruction.contains("Relevant tables"))
            .returning(|_| Ok("SELECT 1".to_string()));
        let stage = SqlGenerationStage::new(Arc::new(mock));
        let context = context();
        let link = SchemaLinkResult::empty();

        stage
            .run(GenerationInput {
                context: &context,
                link: &link,
            })
            .await
            .unwrap();
    }
}
