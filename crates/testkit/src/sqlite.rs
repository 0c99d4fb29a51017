//! SQLite-backed executor.
//!
//! Runs statements against an in-memory SQLite database through `rusqlite`,
//! so synthesized SQL is exercised by a real engine. Foreign-key
//! enforcement is switched on when the database is opened.

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use tillage_core::{ExecOutcome, Executor, ExecutorError, Row, Value};

/// Executor over a single SQLite connection.
#[derive(Debug)]
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Opens a fresh in-memory database with foreign keys enforced.
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Wraps an existing connection as is.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns true if `table` exists.
    pub fn has_table(&self, table: &str) -> rusqlite::Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn run(&self, sql: &str, params: &[Value]) -> rusqlite::Result<ExecOutcome> {
        let mut stmt = self.conn.prepare(sql)?;
        let bound = params_from_iter(params.iter().map(to_sql));

        let width = stmt.column_count();
        if width > 0 {
            let mut rows = stmt.query(bound)?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                let values = (0..width)
                    .map(|i| from_sql(row.get_ref(i)?, i))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                out.push(Row::new(values));
            }
            return Ok(ExecOutcome::with_rows(out));
        }

        let changed = stmt.execute(bound)?;
        Ok(ExecOutcome {
            rows: Vec::new(),
            rows_affected: changed as u64,
            generated_id: is_insert(sql).then(|| self.conn.last_insert_rowid()),
        })
    }
}

impl Executor for SqliteExecutor {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecOutcome, ExecutorError> {
        Ok(self.run(sql, params)?)
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(v) => SqlValue::Integer(*v),
        Value::Text(v) => SqlValue::Text(v.clone()),
    }
}

fn from_sql(value: ValueRef<'_>, index: usize) -> rusqlite::Result<Value> {
    match value {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(v) => Ok(Value::Integer(v)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| Value::Text(text.to_string()))
            .map_err(rusqlite::Error::Utf8Error),
        other => Err(rusqlite::Error::InvalidColumnType(
            index,
            format!("column {}", index),
            other.data_type(),
        )),
    }
}

fn is_insert(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|word| word.eq_ignore_ascii_case("INSERT"))
}
