//! Core types for the pipeline
//!
//! - Query context threaded through every stage unchanged
//! - Link results, SQL text, execution outcomes
//! - Per-run reports returned by the orchestrator

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ulid::Ulid;

/// Unique pipeline-run identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub Ulid);

impl RunId {
    /// Generate new run ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invariant context for one pipeline run
///
/// Created once per invocation and never mutated across stage
/// boundaries; stages clone it forward as needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryContext {
    /// Natural-language question
    pub question: String,
    /// Target database identifier
    pub db_id: String,
    /// Reasoning-type label, passed through uninterpreted
    pub reasoning_type: String,
}

impl QueryContext {
    /// Create a context
    #[inline]
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        db_id: impl Into<String>,
        reasoning_type: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            db_id: db_id.into(),
            reasoning_type: reasoning_type.into(),
        }
    }
}

/// Output of the schema-linking stage
///
/// Sets, not sequences: linking narrows the schema, it does not order
/// it. `BTreeSet` keeps prompt rendering deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaLinkResult {
    /// Table names judged relevant to the question
    pub linked_tables: BTreeSet<String>,
    /// Column names judged relevant to the question
    pub linked_columns: BTreeSet<String>,
}

impl SchemaLinkResult {
    /// Empty link set (also the baseline path's stand-in)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether nothing was linked
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.linked_tables.is_empty() && self.linked_columns.is_empty()
    }
}

/// One SQL statement as raw text
///
/// No validation is performed at construction; a syntactically invalid
/// statement is a legitimate value here and fails at execution, where
/// the engine can say why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqlQuery(String);

impl SqlQuery {
    /// Wrap raw SQL text
    #[inline]
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    /// The SQL text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SqlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One result cell, mirroring SQLite's storage classes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    /// SQL NULL
    Null,
    /// 64-bit integer
    Integer(i64),
    /// 64-bit float
    Real(f64),
    /// Text
    Text(String),
    /// Raw bytes
    Blob(Vec<u8>),
}

impl From<rusqlite::types::Value> for CellValue {
    fn from(value: rusqlite::types::Value) -> Self {
        use rusqlite::types::Value;
        match value {
            Value::Null => Self::Null,
            Value::Integer(i) => Self::Integer(i),
            Value::Real(r) => Self::Real(r),
            Value::Text(s) => Self::Text(s),
            Value::Blob(b) => Self::Blob(b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// One result row
pub type Row = Vec<CellValue>;

/// Outcome of executing one SQL statement
///
/// Success and failure are exclusive: a failed execution carries a
/// diagnostic and no data, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExecutionOutcome {
    /// Query ran; columns in engine order, rows in fetch order
    Success {
        /// Column names as reported by the engine
        columns: Vec<String>,
        /// Result rows
        rows: Vec<Row>,
        /// Whether the row cap cut the result short
        truncated: bool,
    },
    /// Query could not run or failed mid-execution
    Failure {
        /// Engine or resolution diagnostic
        error: String,
    },
}

impl ExecutionOutcome {
    /// Failure outcome from any displayable diagnostic
    #[inline]
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// Whether the query produced data
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The diagnostic, if this is a failure
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Column names; empty on failure
    #[must_use]
    pub fn columns(&self) -> &[String] {
        match self {
            Self::Success { columns, .. } => columns,
            Self::Failure { .. } => &[],
        }
    }

    /// Result rows; empty on failure
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        match self {
            Self::Success { rows, .. } => rows,
            Self::Failure { .. } => &[],
        }
    }
}

/// Everything one path produced, intermediates included
#[derive(Debug)]
pub struct PathReport {
    /// Link result; `None` on the baseline path, which skips linking
    pub link: Option<SchemaLinkResult>,
    /// Generated SQL
    pub sql: SqlQuery,
    /// Execution outcome
    pub execution: ExecutionOutcome,
}

/// Result of one orchestrator invocation
///
/// The two paths are independent: either may fail fatally without
/// affecting the other, so each carries its own `Result`.
#[derive(Debug)]
pub struct PipelineReport {
    /// Run identifier (appears in logs)
    pub run_id: RunId,
    /// The context this run was invoked with
    pub context: QueryContext,
    /// Full path: retrieval, linking, generation, execution
    pub full: Result<PathReport, PipelineError>,
    /// Baseline path: generation with no link set, then execution
    pub baseline: Result<PathReport, PipelineError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_generation() {
        assert_ne!(RunId::new(), RunId::new());
    }

    #[test]
    fn link_result_empty() {
        let link = SchemaLinkResult::empty();
        assert!(link.is_empty());

        let mut linked = SchemaLinkResult::empty();
        linked.linked_tables.insert("films".to_string());
        assert!(!linked.is_empty());
    }

    #[test]
    fn sql_query_roundtrip() {
        let sql = SqlQuery::new("SELECT 1");
        assert_eq!(sql.as_str(), "SELECT 1");
        assert_eq!(sql.to_string(), "SELECT 1");
        assert_eq!(sql.into_inner(), "SELECT 1");
    }

    #[test]
    fn outcome_success_accessors() {
        let outcome = ExecutionOutcome::Success {
            columns: vec!["title".to_string()],
            rows: vec![vec![CellValue::from("Arrival")]],
            truncated: false,
        };
        assert!(outcome.is_success());
        assert_eq!(outcome.error(), None);
        assert_eq!(outcome.columns(), ["title".to_string()]);
        assert_eq!(outcome.rows().len(), 1);
    }

    #[test]
    fn outcome_failure_accessors() {
        let outcome = ExecutionOutcome::failure("no such table: films");
        assert!(!outcome.is_success());
        assert_eq!(outcome.error(), Some("no such table: films"));
        assert!(outcome.columns().is_empty());
        assert!(outcome.rows().is_empty());
    }

    #[test]
    fn cell_value_from_sqlite() {
        use rusqlite::types::Value;
        assert_eq!(CellValue::from(Value::Null), CellValue::Null);
        assert_eq!(CellValue::from(Value::Integer(2016)), CellValue::Integer(2016));
        assert_eq!(
            CellValue::from(Value::Text("Arrival".to_string())),
            CellValue::Text("Arrival".to_string())
        );
    }
}
