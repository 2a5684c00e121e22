//! Schema linking stage
//!
//! Asks the reasoner which tables and columns matter for the question
//! and parses its reply as JSON. An unparseable reply fails with
//! [`PipelineError::LinkingParse`] - never a silent empty link set, so
//! the failure stays visible upstream.

use crate::error::PipelineError;
use crate::stages::retrieval::RetrievedSchema;
use crate::stages::strip_code_fence;
use crate::types::SchemaLinkResult;
use serde::Deserialize;
use std::sync::Arc;
use weave_reasoning::Reasoner;

/// Expected reply shape from the reasoner
#[derive(Debug, Deserialize)]
struct LinkReply {
    linked_tables: Vec<String>,
    linked_columns: Vec<String>,
}

/// Stage 2: narrow the schema to question-relevant tables and columns
#[derive(Clone)]
pub struct SchemaLinkingStage {
    reasoner: Arc<dyn Reasoner>,
}

impl SchemaLinkingStage {
    /// Create the stage over a shared reasoner
    #[inline]
    #[must_use]
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self { reasoner }
    }

    /// Run linking
    ///
    /// An empty schema short-circuits to an empty link set without a
    /// reasoning call: there is nothing to link against, and that is
    /// not an error by itself.
    pub async fn run(&self, input: &RetrievedSchema) -> Result<SchemaLinkResult, PipelineError> {
        if input.schema.is_empty() {
            tracing::debug!(db_id = %input.context.db_id, "empty schema, skipping linking call");
            return Ok(SchemaLinkResult::empty());
        }

        let instruction = build_instruction(input);
        let reply = self.reasoner.complete(&instruction).await?;
        let link = parse_reply(&reply)?;

        tracing::debug!(
            tables = link.linked_tables.len(),
            columns = link.linked_columns.len(),
            "schema linked"
        );
        Ok(link)
    }
}

impl std::fmt::Debug for SchemaLinkingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaLinkingStage").finish_non_exhaustive()
    }
}

fn build_instruction(input: &RetrievedSchema) -> String {
    format!(
        "Given the database schema below, identify the tables and columns relevant \
         to the question. Reply with a JSON object of the form \
         {{\"linked_tables\": [...], \"linked_columns\": [...]}} and nothing else.\n\n\
         Schema:\n{}\nQuestion: {}",
        input.schema.to_prompt_text(),
        input.context.question,
    )
}

fn parse_reply(reply: &str) -> Result<SchemaLinkResult, PipelineError> {
    let body = strip_code_fence(reply);
    let parsed: LinkReply = serde_json::from_str(body)
        .map_err(|e| PipelineError::LinkingParse(format!("{e} in reply: {body}")))?;

    Ok(SchemaLinkResult {
        linked_tables: parsed.linked_tables.into_iter().collect(),
        linked_columns: parsed.linked_columns.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueryContext;
    use weave_catalog::{SchemaDescription, TableSchema};
    use weave_reasoning::{MockReasoner, ScriptedReasoner};

    fn retrieved(schema: SchemaDescription) -> RetrievedSchema {
        RetrievedSchema {
            context: QueryContext::new("Which films came out in 2016?", "film_db", "comparison"),
            schema,
        }
    }

    fn film_schema() -> SchemaDescription {
        SchemaDescription::empty()
            .with_table("films", TableSchema::from_names(["id", "title", "year"]))
    }

    #[tokio::test]
    async fn parses_well_formed_reply() {
        let reasoner = Arc::new(ScriptedReasoner::new([
            r#"{"linked_tables": ["films"], "linked_columns": ["title", "year"]}"#,
        ]));
        let stage = SchemaLinkingStage::new(reasoner);

        let link = stage.run(&retrieved(film_schema())).await.unwrap();
        assert!(link.linked_tables.contains("films"));
        assert_eq!(link.linked_columns.len(), 2);
    }

    #[tokio::test]
    async fn tolerates_fenced_reply() {
        let reasoner = Arc::new(ScriptedReasoner::new([
            "```json\n{\"linked_tables\": [\"films\"], \"linked_columns\": [\"year\"]}\n```",
        ]));
        let stage = SchemaLinkingStage::new(reasoner);

        let link = stage.run(&retrieved(film_schema())).await.unwrap();
        assert!(link.linked_tables.contains("films"));
    }

    #[tokio::test]
    async fn malformed_reply_is_a_parse_error() {
        let mut mock = MockReasoner::new();
        mock.expect_complete()
            .returning(|_| Ok("the relevant table is films".to_string()));
        let stage = SchemaLinkingStage::new(Arc::new(mock));

        let err = stage.run(&retrieved(film_schema())).await.unwrap_err();
        assert!(err.is_linking_parse());
    }

    #[tokio::test]
    async fn empty_schema_short_circuits() {
        // No scripted replies: a reasoning call would error out.
        let reasoner = Arc::new(ScriptedReasoner::new(Vec::<String>::new()));
        let stage = SchemaLinkingStage::new(reasoner);

        let link = stage
            .run(&retrieved(SchemaDescription::empty()))
            .await
            .unwrap();
        assert!(link.is_empty());
    }

    #[tokio::test]
    async fn instruction_carries_schema_and_question() {
        let mut mock = MockReasoner::new();
        mock.expect_complete()
            .withf(|instruction: &str| {
                instruction.contains("films(id, title, year)")
                    && instruction.contains("Which films came out in 2016?")
            })
            .returning(|_| Ok(r#"{"linked_tables": [], "linked_columns": []}"#.to_string()));
        let stage = SchemaLinkingStage::new(Arc::new(mock));

        stage.run(&retrieved(film_schema())).await.unwrap();
    }
}
