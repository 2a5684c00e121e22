//! Pipeline stages
//!
//! Four typed transforms, each consuming prior-stage output plus the
//! invariant [`QueryContext`](crate::QueryContext):
//! - [`SchemaRetrievalStage`]: context -> context + schema
//! - [`SchemaLinkingStage`]: schema + question -> linked tables/columns
//! - [`SqlGenerationStage`]: link set + question -> SQL text
//! - [`SqlExecutionStage`]: SQL + db_id -> columns and rows, or a diagnostic
//!
//! The topology is static; there is no runtime stage registry.

pub mod execution;
pub mod generation;
pub mod linking;
pub mod retrieval;

pub use execution::SqlExecutionStage;
pub use generation::{GenerationInput, SqlGenerationStage};
pub use linking::SchemaLinkingStage;
pub use retrieval::{RetrievedSchema, SchemaRetrievalStage};

/// Strip a markdown code fence from a reasoner reply
///
/// Reasoning backends habitually wrap structured output in
/// ```` ```json ... ``` ```` fences. Returns the inner text trimmed;
/// unfenced input is just trimmed.
pub(crate) fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the language tag line, then the closing fence
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.strip_suffix("```").unwrap_or(body).trim()
}
