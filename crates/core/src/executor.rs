//! The executor boundary.
//!
//! An executor runs one SQL statement with positional parameters against a
//! live database. Connection lifecycle, transactions, retries and timeouts
//! all belong to the executor; the ORM only ever calls [`Executor::execute`].

use crate::error::ExecutorError;
use crate::row::Row;
use crate::value::Value;

/// Result of one executed statement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Rows produced by the statement, in engine order.
    pub rows: Vec<Row>,
    /// Number of rows inserted, updated or deleted.
    pub rows_affected: u64,
    /// Identity generated by an insert.
    pub generated_id: Option<i64>,
}

impl ExecOutcome {
    /// Outcome of a query returning rows.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Outcome of a statement touching `count` rows.
    pub fn affected(count: u64) -> Self {
        Self {
            rows_affected: count,
            ..Default::default()
        }
    }

    /// Outcome of an insert that generated `id`.
    pub fn inserted(id: i64) -> Self {
        Self {
            rows: Vec::new(),
            rows_affected: 1,
            generated_id: Some(id),
        }
    }
}

/// Runs statements against a database.
pub trait Executor {
    /// Executes `sql` with `params` bound to its placeholders in order.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecOutcome, ExecutorError>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecOutcome, ExecutorError> {
        (**self).execute(sql, params)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecOutcome, ExecutorError> {
        (**self).execute(sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Executor for Echo {
        fn execute(&mut self, _sql: &str, params: &[Value]) -> Result<ExecOutcome, ExecutorError> {
            Ok(ExecOutcome::with_rows(vec![Row::new(params.to_vec())]))
        }
    }

    #[test]
    fn test_outcome_constructors() {
        assert_eq!(ExecOutcome::inserted(7).generated_id, Some(7));
        assert_eq!(ExecOutcome::affected(2).rows_affected, 2);
        assert!(ExecOutcome::with_rows(Vec::new()).rows.is_empty());
    }

    fn run_one<E: Executor>(mut executor: E, value: Value) -> ExecOutcome {
        executor.execute("SELECT ?", &[value]).unwrap()
    }

    #[test]
    fn test_borrowed_and_boxed_executors() {
        let mut echo = Echo;
        let out = run_one(&mut echo, Value::Integer(1));
        assert_eq!(out.rows[0].get(0), Some(&Value::Integer(1)));

        let boxed: Box<dyn Executor> = Box::new(Echo);
        let out = run_one(boxed, Value::Null);
        assert_eq!(out.rows.len(), 1);
    }
}
