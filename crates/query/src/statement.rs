//! Synthesized statements.

use core::fmt;

/// SQL text plus the columns whose values must be bound, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    bind_columns: Vec<String>,
}

impl Statement {
    /// Creates a statement.
    pub fn new(sql: impl Into<String>, bind_columns: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            bind_columns,
        }
    }

    /// Returns the SQL text.
    #[inline]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the columns to bind, in placeholder order.
    #[inline]
    pub fn bind_columns(&self) -> &[String] {
        &self.bind_columns
    }

    /// Returns the number of placeholders.
    #[inline]
    pub fn arity(&self) -> usize {
        self.bind_columns.len()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
