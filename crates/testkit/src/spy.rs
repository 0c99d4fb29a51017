//! Recording executor.

use crate::ids::IdSequence;
use std::collections::VecDeque;
use thiserror::Error;
use tillage_core::{ExecOutcome, Executor, ExecutorError, Row, Value};

/// One statement received by a [`SpyExecutor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Error replayed by a [`SpyExecutor`] script.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("scripted failure: {message}")]
pub struct ScriptedError {
    pub message: String,
}

impl ScriptedError {
    /// Creates a scripted error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
enum Reply {
    Outcome(ExecOutcome),
    Fail(ScriptedError),
}

/// Executor that records every call and answers from a script.
///
/// Scripted replies are consumed in order. Once the script runs dry, inserts
/// get the next identity from the spy's [`IdSequence`] and every other
/// statement gets an empty outcome.
#[derive(Debug, Default)]
pub struct SpyExecutor {
    calls: Vec<Call>,
    script: VecDeque<Reply>,
    ids: IdSequence,
}

impl SpyExecutor {
    /// Creates a spy assigning identities from 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a spy assigning identities from `ids`.
    pub fn with_ids(ids: IdSequence) -> Self {
        Self {
            ids,
            ..Default::default()
        }
    }

    /// Queues an outcome.
    pub fn push_outcome(&mut self, outcome: ExecOutcome) -> &mut Self {
        self.script.push_back(Reply::Outcome(outcome));
        self
    }

    /// Queues a row set.
    pub fn push_rows<I>(&mut self, rows: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Row>,
    {
        let rows = rows.into_iter().map(Into::into).collect();
        self.push_outcome(ExecOutcome::with_rows(rows))
    }

    /// Queues a failure.
    pub fn push_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.script.push_back(Reply::Fail(ScriptedError::new(message)));
        self
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<&Call> {
        self.calls.last()
    }

    /// Number of scripted replies not yet consumed.
    pub fn pending(&self) -> usize {
        self.script.len()
    }
}

impl Executor for SpyExecutor {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecOutcome, ExecutorError> {
        self.calls.push(Call {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        match self.script.pop_front() {
            Some(Reply::Outcome(outcome)) => Ok(outcome),
            Some(Reply::Fail(err)) => Err(err.into()),
            None if sql.starts_with("INSERT") => Ok(ExecOutcome::inserted(self.ids.next_id())),
            None => Ok(ExecOutcome::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls() {
        let mut spy = SpyExecutor::new();
        spy.execute("SELECT * FROM crops", &[]).unwrap();
        spy.execute("SELECT * FROM crops WHERE id = ?", &[Value::Integer(2)])
            .unwrap();

        assert_eq!(spy.call_count(), 2);
        assert_eq!(spy.calls()[0].sql, "SELECT * FROM crops");
        assert_eq!(spy.last_call().unwrap().params, vec![Value::Integer(2)]);
    }

    #[test]
    fn test_script_consumed_in_order() {
        let mut spy = SpyExecutor::new();
        spy.push_rows(vec![vec![Value::Integer(1), Value::from("carrot")]])
            .push_error("disk full");

        let first = spy.execute("SELECT * FROM crops", &[]).unwrap();
        assert_eq!(first.rows.len(), 1);

        let err = spy.execute("SELECT * FROM crops", &[]).unwrap_err();
        let scripted = err.downcast_ref::<ScriptedError>().unwrap();
        assert_eq!(scripted.message, "disk full");
        assert_eq!(spy.pending(), 0);
    }

    #[test]
    fn test_unscripted_inserts_get_ids() {
        let mut spy = SpyExecutor::with_ids(IdSequence::new(40));
        let a = spy.execute("INSERT INTO crops (name) VALUES (?)", &["a".into()]).unwrap();
        let b = spy.execute("INSERT INTO crops (name) VALUES (?)", &["b".into()]).unwrap();
        let other = spy.execute("DELETE FROM crops", &[]).unwrap();

        assert_eq!(a.generated_id, Some(40));
        assert_eq!(b.generated_id, Some(41));
        assert_eq!(other, ExecOutcome::default());
    }
}
