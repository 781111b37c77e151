//! MySQL-compatible execution backend.
//!
//! Implements [`SqlExecutor`] over a `mysql_async` connection. The executor
//! owns a single connection so that `begin`/`commit`/`rollback` and the
//! statements between them run on the same session.

use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, Params, Pool, Row, Value};
use tokio::sync::Mutex;

use crate::executor::{ExecutionError, ExecutionOutcome, SqlExecutor};
use sql_params::{SqlParam, SqlValue};

/// Create a connection pool from a `mysql://` connection string.
pub fn new_mysql_pool(connection_string: &str) -> Result<Pool, ExecutionError> {
    Pool::from_url(connection_string).map_err(map_mysql_error)
}

/// A [`SqlExecutor`] backed by one MySQL connection.
pub struct MySqlExecutor {
    conn: Mutex<Conn>,
}

impl MySqlExecutor {
    /// Acquire a connection from the pool.
    pub async fn connect(pool: &Pool) -> Result<Self, ExecutionError> {
        let conn = pool.get_conn().await.map_err(map_mysql_error)?;
        tracing::debug!("Acquired MySQL connection");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl SqlExecutor for MySqlExecutor {
    async fn execute(
        &self,
        statement: &str,
        params: &[SqlParam],
    ) -> Result<ExecutionOutcome, ExecutionError> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<Row> = conn
            .exec(statement, to_mysql_params(params))
            .await
            .map_err(map_mysql_error)?;

        // last_insert_id is session-scoped and survives reads; only inserts
        // report a generated id.
        let generated_id = if is_insert(statement) {
            conn.last_insert_id().unwrap_or(0)
        } else {
            0
        };
        let mut result_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = Vec::with_capacity(row.len());
            for value in row.unwrap() {
                cells.push(SqlValue::try_from(value).map_err(|e| {
                    ExecutionError::Connectivity {
                        message: format!("unreadable result cell: {e}"),
                    }
                })?);
            }
            result_rows.push(cells);
        }

        Ok(ExecutionOutcome {
            generated_id,
            rows: result_rows,
        })
    }

    async fn begin(&self) -> Result<(), ExecutionError> {
        let mut conn = self.conn.lock().await;
        conn.query_drop("START TRANSACTION")
            .await
            .map_err(map_transaction_error)
    }

    async fn commit(&self) -> Result<(), ExecutionError> {
        let mut conn = self.conn.lock().await;
        conn.query_drop("COMMIT").await.map_err(map_transaction_error)
    }

    async fn rollback(&self) -> Result<(), ExecutionError> {
        let mut conn = self.conn.lock().await;
        conn.query_drop("ROLLBACK")
            .await
            .map_err(map_transaction_error)
    }
}

fn is_insert(statement: &str) -> bool {
    statement
        .trim_start()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("INSERT"))
}

fn to_mysql_params(params: &[SqlParam]) -> Params {
    if params.is_empty() {
        return Params::Empty;
    }
    Params::Named(
        params
            .iter()
            .map(|p| (p.name.clone().into_bytes(), Value::from(p.value.clone())))
            .collect(),
    )
}

/// Duplicate-key and foreign-key server errors are constraint violations;
/// everything else is treated as a connectivity failure for this record.
fn map_mysql_error(e: mysql_async::Error) -> ExecutionError {
    match &e {
        mysql_async::Error::Server(server)
            if matches!(server.code, 1062 | 1216 | 1217 | 1451 | 1452 | 3819) =>
        {
            ExecutionError::ConstraintViolation {
                message: server.message.clone(),
            }
        }
        _ => ExecutionError::Connectivity {
            message: e.to_string(),
        },
    }
}

fn map_transaction_error(e: mysql_async::Error) -> ExecutionError {
    ExecutionError::Transaction {
        message: e.to_string(),
    }
}
