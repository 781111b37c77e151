//! Test support: an in-memory [`SqlExecutor`] fake.
//!
//! [`FakeExecutor`] understands just enough of the statement catalog in
//! [`crate::statements`] to behave like the relational target: inserts
//! allocate monotonically increasing ids and stage rows in the open
//! transaction, id lookups match staged and committed rows by the bound
//! parameter values (null equals null, like the `<=>` operator), and
//! rollback discards everything staged since `begin`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::executor::{ExecutionError, ExecutionOutcome, SqlExecutor};
use sql_params::{SqlParam, SqlValue};

#[derive(Debug, Clone)]
struct FakeRow {
    table: String,
    id: u64,
    values: HashMap<String, SqlValue>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    in_transaction: bool,
    committed: Vec<FakeRow>,
    staged: Vec<FakeRow>,
    committed_log: Vec<(String, Vec<SqlParam>)>,
    staged_log: Vec<(String, Vec<SqlParam>)>,
    fail_on: Vec<String>,
}

/// In-memory stand-in for the relational target.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    state: Mutex<State>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make any statement containing `fragment` fail with a constraint
    /// violation.
    pub fn fail_on(&self, fragment: &str) {
        self.state.lock().unwrap().fail_on.push(fragment.to_string());
    }

    /// Statements whose effects survived a commit, in execution order.
    pub fn committed_statements(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .committed_log
            .iter()
            .map(|(statement, _)| statement.clone())
            .collect()
    }

    /// Parameter sets bound to committed executions of `statement`.
    pub fn params_for(&self, statement: &str) -> Vec<Vec<SqlParam>> {
        self.state
            .lock()
            .unwrap()
            .committed_log
            .iter()
            .filter(|(s, _)| s == statement)
            .map(|(_, params)| params.clone())
            .collect()
    }

    /// Number of committed rows in `table`.
    pub fn committed_rows(&self, table: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .committed
            .iter()
            .filter(|row| row.table == table)
            .count()
    }
}

/// Extract the backtick-quoted table name following `marker`.
fn table_after<'a>(statement: &'a str, marker: &str) -> Option<&'a str> {
    let rest = &statement[statement.find(marker)? + marker.len()..];
    let rest = rest.strip_prefix('`')?;
    rest.split('`').next()
}

#[async_trait]
impl SqlExecutor for FakeExecutor {
    async fn execute(
        &self,
        statement: &str,
        params: &[SqlParam],
    ) -> Result<ExecutionOutcome, ExecutionError> {
        let mut state = self.state.lock().unwrap();

        if let Some(fragment) = state.fail_on.iter().find(|f| statement.contains(f.as_str())) {
            return Err(ExecutionError::ConstraintViolation {
                message: format!("injected failure on '{fragment}'"),
            });
        }

        if statement.starts_with("SELECT") {
            let table = table_after(statement, "FROM ").ok_or_else(|| {
                ExecutionError::ConstraintViolation {
                    message: format!("unrecognized select: {statement}"),
                }
            })?;
            let found = state
                .committed
                .iter()
                .chain(state.staged.iter())
                .find(|row| {
                    row.table == table
                        && params
                            .iter()
                            .all(|p| row.values.get(&p.name) == Some(&p.value))
                });
            let rows = match found {
                Some(row) => vec![vec![SqlValue::Int(row.id as i64)]],
                None => Vec::new(),
            };
            return Ok(ExecutionOutcome {
                generated_id: 0,
                rows,
            });
        }

        if statement.starts_with("INSERT") {
            let table = table_after(statement, "INTO ").ok_or_else(|| {
                ExecutionError::ConstraintViolation {
                    message: format!("unrecognized insert: {statement}"),
                }
            })?;
            state.next_id += 1;
            let id = state.next_id;
            let row = FakeRow {
                table: table.to_string(),
                id,
                values: params
                    .iter()
                    .map(|p| (p.name.clone(), p.value.clone()))
                    .collect(),
            };
            let entry = (statement.to_string(), params.to_vec());
            if state.in_transaction {
                state.staged.push(row);
                state.staged_log.push(entry);
            } else {
                state.committed.push(row);
                state.committed_log.push(entry);
            }
            return Ok(ExecutionOutcome {
                generated_id: id,
                rows: Vec::new(),
            });
        }

        Err(ExecutionError::ConstraintViolation {
            message: format!("unrecognized statement: {statement}"),
        })
    }

    async fn begin(&self) -> Result<(), ExecutionError> {
        let mut state = self.state.lock().unwrap();
        if state.in_transaction {
            return Err(ExecutionError::Transaction {
                message: "transaction already open".to_string(),
            });
        }
        state.in_transaction = true;
        Ok(())
    }

    async fn commit(&self) -> Result<(), ExecutionError> {
        let mut state = self.state.lock().unwrap();
        if !state.in_transaction {
            return Err(ExecutionError::Transaction {
                message: "no open transaction".to_string(),
            });
        }
        let staged = std::mem::take(&mut state.staged);
        state.committed.extend(staged);
        let staged_log = std::mem::take(&mut state.staged_log);
        state.committed_log.extend(staged_log);
        state.in_transaction = false;
        Ok(())
    }

    async fn rollback(&self) -> Result<(), ExecutionError> {
        let mut state = self.state.lock().unwrap();
        if !state.in_transaction {
            return Err(ExecutionError::Transaction {
                message: "no open transaction".to_string(),
            });
        }
        state.staged.clear();
        state.staged_log.clear();
        state.in_transaction = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements;
    use sql_params::string_param;

    #[tokio::test]
    async fn test_insert_allocates_increasing_ids() {
        let executor = FakeExecutor::new();
        let params = [
            string_param("identityId", "A"),
            string_param("name", "NAME"),
        ];
        let first = executor
            .execute(statements::insert_identity(), &params)
            .await
            .unwrap();
        let second = executor
            .execute(statements::insert_identity(), &params)
            .await
            .unwrap();
        assert_eq!(first.generated_id, 1);
        assert_eq!(second.generated_id, 2);
    }

    #[tokio::test]
    async fn test_lookup_matches_on_bound_values() {
        let executor = FakeExecutor::new();
        executor
            .execute(
                statements::insert_identity(),
                &[
                    string_param("identityId", "A"),
                    string_param("name", "NAME"),
                ],
            )
            .await
            .unwrap();

        let hit = executor
            .execute(
                statements::select_identity_id(),
                &[string_param("identityId", "A")],
            )
            .await
            .unwrap();
        assert_eq!(hit.first_id(), Some(1));

        let miss = executor
            .execute(
                statements::select_identity_id(),
                &[string_param("identityId", "B")],
            )
            .await
            .unwrap();
        assert_eq!(miss.first_id(), None);
    }

    #[tokio::test]
    async fn test_null_matches_null_in_lookups() {
        let executor = FakeExecutor::new();
        executor
            .execute(
                statements::insert_vehicle(),
                &[
                    string_param("systemNumber", "S"),
                    string_param("vin", "V"),
                    SqlParam::new("vrmTrm", SqlValue::Null),
                    SqlParam::new("trailerId", SqlValue::Null),
                ],
            )
            .await
            .unwrap();

        let hit = executor
            .execute(
                statements::select_vehicle_id(),
                &[string_param("systemNumber", "S")],
            )
            .await
            .unwrap();
        assert_eq!(hit.first_id(), Some(1));
    }

    #[tokio::test]
    async fn test_rollback_discards_staged_rows() {
        let executor = FakeExecutor::new();
        executor.begin().await.unwrap();
        executor
            .execute(
                statements::insert_identity(),
                &[
                    string_param("identityId", "A"),
                    string_param("name", "NAME"),
                ],
            )
            .await
            .unwrap();
        executor.rollback().await.unwrap();

        assert_eq!(executor.committed_rows("identity"), 0);
        let miss = executor
            .execute(
                statements::select_identity_id(),
                &[string_param("identityId", "A")],
            )
            .await
            .unwrap();
        assert_eq!(miss.first_id(), None);
    }

    #[tokio::test]
    async fn test_lookup_sees_rows_staged_in_the_open_transaction() {
        let executor = FakeExecutor::new();
        executor.begin().await.unwrap();
        executor
            .execute(
                statements::insert_identity(),
                &[
                    string_param("identityId", "A"),
                    string_param("name", "NAME"),
                ],
            )
            .await
            .unwrap();

        let hit = executor
            .execute(
                statements::select_identity_id(),
                &[string_param("identityId", "A")],
            )
            .await
            .unwrap();
        assert_eq!(hit.first_id(), Some(1));
        executor.commit().await.unwrap();
        assert_eq!(executor.committed_rows("identity"), 1);
    }
}
