//! SQL execution stage
//!
//! Resolves the db_id to its SQLite file, opens a read-only connection
//! scoped to the call, and runs the query. Execution failures are data:
//! every error path logs a diagnostic and returns
//! [`ExecutionOutcome::Failure`], never a panic or a propagated error,
//! so the orchestrator can always render "no result" in a comparison.

use crate::config::PipelineConfig;
use crate::types::{CellValue, ExecutionOutcome, Row, SqlQuery};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use weave_catalog::DatabaseRegistry;

/// Stage 4: run the SQL against the registered database
#[derive(Debug, Clone)]
pub struct SqlExecutionStage {
    registry: Arc<DatabaseRegistry>,
    max_rows: usize,
}

impl SqlExecutionStage {
    /// Create the stage over a shared registry
    #[inline]
    #[must_use]
    pub fn new(registry: Arc<DatabaseRegistry>, config: &PipelineConfig) -> Self {
        Self {
            registry,
            max_rows: config.max_result_rows,
        }
    }

    /// Execute one query
    ///
    /// rusqlite is synchronous, so the connect/execute/drop sequence
    /// runs under `spawn_blocking`. The connection lives inside that
    /// closure and drops on every exit path.
    pub async fn run(&self, sql: &SqlQuery, db_id: &str) -> ExecutionOutcome {
        let Some(handle) = self.registry.resolve(db_id) else {
            return ExecutionOutcome::failure(format!("no database found for db_id={db_id}"));
        };

        let path: PathBuf = handle.path.clone();
        let sql = sql.clone();
        let db_id = db_id.to_string();
        let max_rows = self.max_rows;

        let joined = tokio::task::spawn_blocking(move || {
            match execute_read_only(&path, sql.as_str(), max_rows) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(%db_id, sql = sql.as_str(), error = %e, "query execution failed");
                    ExecutionOutcome::failure(e.to_string())
                }
            }
        })
        .await;

        match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "execution task failed to complete");
                ExecutionOutcome::failure(format!("execution task failed: {e}"))
            }
        }
    }
}

/// Connect, execute, and collect rows up to `max_rows`
fn execute_read_only(
    path: &Path,
    sql: &str,
    max_rows: usize,
) -> Result<ExecutionOutcome, rusqlite::Error> {
    let connection = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let mut statement = connection.prepare(sql)?;
    let columns: Vec<String> = statement
        .column_names()
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut rows = statement.query([])?;
    let mut collected: Vec<Row> = Vec::new();
    let mut truncated = false;
    while let Some(row) = rows.next()? {
        if collected.len() >= max_rows {
            truncated = true;
            break;
        }
        let mut record = Row::with_capacity(columns.len());
        for index in 0..columns.len() {
            let value: rusqlite::types::Value = row.get(index)?;
            record.push(CellValue::from(value));
        }
        collected.push(record);
    }

    Ok(ExecutionOutcome::Success {
        columns,
        rows: collected,
        truncated,
    })
}
