//! The generic CRUD facade.

use crate::mapper::{from_row, to_parameters};
use crate::record::Record;
use crate::registry::SchemaRegistry;
use std::marker::PhantomData;
use std::sync::Arc;
use tillage_core::schema::Schema;
use tillage_core::{Config, Error, ExecOutcome, Executor, Order, Result, Value};
use tillage_query::{Statement, Synthesizer};
use tracing::{debug, info, warn};

/// CRUD operations for one record type over an injected executor.
///
/// Every operation issues at most one statement. Errors from the executor
/// are returned as [`Error::Executor`] without interpretation; nothing is
/// retried.
pub struct Model<R, E> {
    schema: Arc<Schema>,
    table: Arc<str>,
    synth: Synthesizer,
    executor: E,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record, E: Executor> Model<R, E> {
    /// Creates a model with the default config and the global registry.
    pub fn new(executor: E) -> Result<Self> {
        Self::with_config(executor, Config::default())
    }

    /// Creates a model rendering statements with `config`.
    pub fn with_config(executor: E, config: Config) -> Result<Self> {
        Self::with_registry(SchemaRegistry::global(), executor, config)
    }

    /// Creates a model resolving its schema through `registry`.
    pub fn with_registry(registry: &SchemaRegistry, executor: E, config: Config) -> Result<Self> {
        config.check()?;
        let registered = registry.schema_for::<R>()?;
        Ok(Self {
            schema: Arc::clone(registered.schema()),
            table: Arc::clone(registered.table()),
            synth: Synthesizer::new(config),
            executor,
            _record: PhantomData,
        })
    }

    /// Returns the schema of `R`.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the table `R` maps to.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Returns the executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Returns the executor mutably.
    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// Consumes the model and returns its executor.
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Creates the table if it does not exist.
    pub fn create_table(&mut self) -> Result<()> {
        let statement = self.synth.create_table(&self.schema, &self.table)?;
        self.run(&statement, &[])?;
        info!(table = %self.table, "table ensured");
        Ok(())
    }

    /// Drops the table if it exists.
    pub fn drop_table(&mut self) -> Result<()> {
        let statement = self.synth.drop_table(&self.schema, &self.table)?;
        self.run(&statement, &[])?;
        info!(table = %self.table, "table dropped");
        Ok(())
    }

    /// Inserts a transient record and stores the generated identity in it.
    ///
    /// Values are validated before any statement is synthesized. On failure
    /// the record's identity is left unset.
    pub fn save(&mut self, record: &mut R) -> Result<i64> {
        if let Some(id) = record.id() {
            return Err(Error::state(format!(
                "{} {} is already persisted",
                self.schema.type_name(),
                id
            )));
        }
        let params = to_parameters(record, &self.schema)?;
        let statement = self.synth.insert(&self.schema, &self.table)?;
        let outcome = self.run(&statement, &params)?;
        let id = outcome.generated_id.ok_or_else(|| {
            Error::mapping(format!(
                "executor reported no generated id for insert into {}",
                self.table
            ))
        })?;
        record.set_id(id);
        Ok(id)
    }

    /// Returns the first row whose `column` equals `value`, if any.
    ///
    /// When several rows match, which one comes back depends on the
    /// executor's row order. Use [`Model::get_all_ordered_by`] when that
    /// matters.
    pub fn get(&mut self, column: &str, value: impl Into<Value>) -> Result<Option<R>> {
        let statement = self.synth.select_by_column(&self.schema, &self.table, column)?;
        let outcome = self.run(&statement, &[value.into()])?;
        if outcome.rows.len() > 1 {
            warn!(
                table = %self.table,
                column,
                matches = outcome.rows.len(),
                "get matched several rows, returning the first"
            );
        }
        outcome
            .rows
            .first()
            .map(|row| from_row(row, &self.schema))
            .transpose()
    }

    /// Returns every row in executor order.
    pub fn get_all(&mut self) -> Result<Vec<R>> {
        let statement = self.synth.select_all(&self.schema, &self.table)?;
        let outcome = self.run(&statement, &[])?;
        self.map_rows(outcome)
    }

    /// Returns every row sorted by `column`.
    pub fn get_all_ordered_by(&mut self, column: &str, order: Order) -> Result<Vec<R>> {
        let statement = self
            .synth
            .select_all_ordered(&self.schema, &self.table, column, order)?;
        let outcome = self.run(&statement, &[])?;
        self.map_rows(outcome)
    }

    /// Counts the rows in the table.
    pub fn count(&mut self) -> Result<u64> {
        let statement = self.synth.count(&self.schema, &self.table)?;
        let outcome = self.run(&statement, &[])?;
        let count = outcome
            .rows
            .first()
            .and_then(|row| row.get(0))
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::mapping(format!("count of {} returned no integer", self.table)))?;
        u64::try_from(count)
            .map_err(|_| Error::mapping(format!("count of {} is negative", self.table)))
    }

    /// Writes the record's current values to its row.
    pub fn update(&mut self, record: &R) -> Result<u64> {
        let id = self.persisted_id(record, "update")?;
        let mut params = to_parameters(record, &self.schema)?;
        params.push(Value::Integer(id));
        let statement = self.synth.update_by_id(&self.schema, &self.table)?;
        let affected = self.run(&statement, &params)?.rows_affected;
        if affected == 0 {
            warn!(table = %self.table, id, "update matched no row");
        }
        Ok(affected)
    }

    /// Deletes the record's row. The record keeps its identity.
    pub fn delete(&mut self, record: &R) -> Result<u64> {
        let id = self.persisted_id(record, "delete")?;
        let statement = self.synth.delete_by_id(&self.schema, &self.table)?;
        let affected = self.run(&statement, &[Value::Integer(id)])?.rows_affected;
        if affected == 0 {
            warn!(table = %self.table, id, "delete matched no row");
        }
        Ok(affected)
    }

    /// Deletes every row.
    pub fn clear(&mut self) -> Result<u64> {
        let statement = self.synth.delete_all(&self.schema, &self.table)?;
        Ok(self.run(&statement, &[])?.rows_affected)
    }

    fn persisted_id(&self, record: &R, operation: &str) -> Result<i64> {
        record.id().ok_or_else(|| {
            Error::state(format!(
                "cannot {} a {} that has not been saved",
                operation,
                self.schema.type_name()
            ))
        })
    }

    fn map_rows(&self, outcome: ExecOutcome) -> Result<Vec<R>> {
        outcome
            .rows
            .iter()
            .map(|row| from_row(row, &self.schema))
            .collect()
    }

    fn run(&mut self, statement: &Statement, params: &[Value]) -> Result<ExecOutcome> {
        debug_assert_eq!(statement.arity(), params.len());
        debug!(sql = statement.sql(), params = params.len(), "executing");
        self.executor
            .execute(statement.sql(), params)
            .map_err(Error::Executor)
    }
}

impl<R, E: std::fmt::Debug> std::fmt::Debug for Model<R, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("table", &self.table)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Fields;
    use tillage_core::schema::Declaration;
    use tillage_core::Row;
    use tillage_testkit::SpyExecutor;

    #[derive(Debug, Clone, PartialEq)]
    struct Tool {
        id: Option<i64>,
        name: String,
    }

    impl Record for Tool {
        fn declaration() -> Declaration {
            Declaration::new("Tool").text("name: charfield, max_length=40")
        }
        fn id(&self) -> Option<i64> {
            self.id
        }
        fn set_id(&mut self, id: i64) {
            self.id = Some(id);
        }
        fn value(&self, column: &str) -> Value {
            match column {
                "name" => self.name.as_str().into(),
                _ => Value::Null,
            }
        }
        fn from_fields(fields: &Fields<'_>) -> Result<Self> {
            Ok(Tool {
                id: Some(fields.id()),
                name: fields.require_text("name")?,
            })
        }
    }

    fn model() -> Model<Tool, SpyExecutor> {
        Model::with_registry(&SchemaRegistry::new(), SpyExecutor::new(), Config::default()).unwrap()
    }

    #[test]
    fn test_save_twice_is_state_error() {
        let mut tools = model();
        let mut rake = Tool {
            id: None,
            name: "rake".into(),
        };
        assert_eq!(tools.save(&mut rake).unwrap(), 1);
        assert!(tools.save(&mut rake).unwrap_err().is_state());
        assert_eq!(tools.executor().call_count(), 1);
    }

    #[test]
    fn test_missing_generated_id() {
        let mut tools = model();
        tools.executor_mut().push_outcome(ExecOutcome::affected(1));
        let mut rake = Tool {
            id: None,
            name: "rake".into(),
        };
        assert!(tools.save(&mut rake).unwrap_err().is_mapping());
        assert_eq!(rake.id, None);
    }

    #[test]
    fn test_count() {
        let mut tools = model();
        tools
            .executor_mut()
            .push_rows([Row::new(vec![Value::Integer(4)])]);
        assert_eq!(tools.count().unwrap(), 4);
        assert_eq!(
            tools.executor().last_call().unwrap().sql,
            "SELECT COUNT(*) FROM tools"
        );

        assert!(tools.count().unwrap_err().is_mapping());
    }

    #[test]
    fn test_custom_placeholder_reaches_executor() {
        let mut tools: Model<Tool, _> = Model::with_registry(
            &SchemaRegistry::new(),
            SpyExecutor::new(),
            Config::default().placeholder("%s"),
        )
        .unwrap();
        tools.get("name", "rake").unwrap();
        assert_eq!(
            tools.into_executor().last_call().unwrap().sql,
            "SELECT * FROM tools WHERE name = %s"
        );
    }

    #[test]
    fn test_bad_config_rejected() {
        let err = Model::<Tool, _>::with_registry(
            &SchemaRegistry::new(),
            SpyExecutor::new(),
            Config::default().placeholder(" "),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
