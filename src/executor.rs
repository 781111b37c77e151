//! The SQL execution collaborator interface.
//!
//! The conversion core never talks to a database directly. It is handed an
//! explicit [`SqlExecutor`] handle with its own lifecycle (acquired before a
//! batch, released after), which keeps the core a pure transform that can be
//! exercised against a fake in tests.

use async_trait::async_trait;
use sql_params::{SqlParam, SqlValue};
use thiserror::Error;

/// Failure from the execution collaborator.
///
/// Variants are distinguishable so the caller's retry policy can treat a
/// constraint violation differently from a dropped connection. Timeouts
/// surface as [`ExecutionError::Connectivity`] for the current record only.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("constraint violation: {message}")]
    ConstraintViolation { message: String },
    #[error("connectivity failure: {message}")]
    Connectivity { message: String },
    #[error("transaction failed: {message}")]
    Transaction { message: String },
}

/// Result of executing one statement.
#[derive(Debug, Clone, Default)]
pub struct ExecutionOutcome {
    /// Auto-generated identifier for inserts; 0 for reads.
    pub generated_id: u64,
    /// Result rows for reads, in column order.
    pub rows: Vec<Vec<SqlValue>>,
}

impl ExecutionOutcome {
    /// The identifier in the first column of the first row, if any.
    ///
    /// Lookup statements in this crate select a single id column, so this is
    /// the whole read contract the orchestrator needs.
    pub fn first_id(&self) -> Option<u64> {
        self.rows
            .first()
            .and_then(|row| row.first())
            .and_then(SqlValue::as_int)
            .map(|id| id as u64)
    }
}

/// Trait for executing SQL statements against the relational target.
///
/// Implementations own connection management, statement serialization, and
/// timeouts. Each record's write sequence is wrapped in `begin`/`commit`
/// (`rollback` on failure) so that either all rows for a document commit,
/// or none do.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute one statement with named, typed parameters.
    async fn execute(
        &self,
        statement: &str,
        params: &[SqlParam],
    ) -> Result<ExecutionOutcome, ExecutionError>;

    /// Open a transaction on the current connection.
    async fn begin(&self) -> Result<(), ExecutionError>;

    /// Commit the open transaction.
    async fn commit(&self) -> Result<(), ExecutionError>;

    /// Roll back the open transaction.
    async fn rollback(&self) -> Result<(), ExecutionError>;
}
