//! Statement synthesis.
//!
//! Every method is a pure function of the schema, the table name and the
//! synthesizer's [`Config`]. Column order always follows schema order.

use crate::statement::Statement;
use tillage_core::schema::{Column, Schema, IDENTITY_COLUMN};
use tillage_core::{ColumnType, Config, Error, Order, Result};

/// Produces SQL text for a schema.
#[derive(Clone, Debug, Default)]
pub struct Synthesizer {
    config: Config,
}

impl Synthesizer {
    /// Creates a synthesizer with the given config.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the config.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `CREATE TABLE IF NOT EXISTS <t> (<col> <type>, ...)`.
    pub fn create_table(&self, schema: &Schema, table: &str) -> Result<Statement> {
        ensure_columns(schema)?;
        let columns: Vec<String> = schema
            .columns()
            .iter()
            .map(|c| self.column_definition(c))
            .collect();
        Ok(Statement::new(
            format!("CREATE TABLE IF NOT EXISTS {} ({})", table, columns.join(", ")),
            Vec::new(),
        ))
    }

    /// `INSERT INTO <t> (<c1>, ...) VALUES (?, ...)` over the non-identity
    /// columns; the identity is assigned by the database.
    pub fn insert(&self, schema: &Schema, table: &str) -> Result<Statement> {
        ensure_columns(schema)?;
        let names = data_column_names(schema);
        let placeholders = vec![self.config.placeholder.as_str(); names.len()];
        Ok(Statement::new(
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table,
                names.join(", "),
                placeholders.join(", ")
            ),
            names,
        ))
    }

    /// `SELECT * FROM <t> WHERE <column> = ?`.
    pub fn select_by_column(&self, schema: &Schema, table: &str, column: &str) -> Result<Statement> {
        ensure_columns(schema)?;
        let column = known_column(schema, column)?;
        Ok(Statement::new(
            format!(
                "SELECT * FROM {} WHERE {} = {}",
                table,
                column.name(),
                self.config.placeholder
            ),
            vec![column.name().to_string()],
        ))
    }

    /// `SELECT * FROM <t>`.
    pub fn select_all(&self, schema: &Schema, table: &str) -> Result<Statement> {
        ensure_columns(schema)?;
        Ok(Statement::new(format!("SELECT * FROM {}", table), Vec::new()))
    }

    /// `SELECT * FROM <t> ORDER BY <column> ASC|DESC`.
    pub fn select_all_ordered(
        &self,
        schema: &Schema,
        table: &str,
        column: &str,
        order: Order,
    ) -> Result<Statement> {
        ensure_columns(schema)?;
        let column = known_column(schema, column)?;
        Ok(Statement::new(
            format!(
                "SELECT * FROM {} ORDER BY {} {}",
                table,
                column.name(),
                order.keyword()
            ),
            Vec::new(),
        ))
    }

    /// `SELECT COUNT(*) FROM <t>`.
    pub fn count(&self, schema: &Schema, table: &str) -> Result<Statement> {
        ensure_columns(schema)?;
        Ok(Statement::new(
            format!("SELECT COUNT(*) FROM {}", table),
            Vec::new(),
        ))
    }

    /// `UPDATE <t> SET <c1> = ?, ... WHERE <id> = ?`, identity bound last.
    pub fn update_by_id(&self, schema: &Schema, table: &str) -> Result<Statement> {
        ensure_columns(schema)?;
        let marker = &self.config.placeholder;
        let mut names = data_column_names(schema);
        let assignments: Vec<String> = names
            .iter()
            .map(|name| format!("{} = {}", name, marker))
            .collect();
        let identity = schema.identity().name();
        names.push(identity.to_string());
        Ok(Statement::new(
            format!(
                "UPDATE {} SET {} WHERE {} = {}",
                table,
                assignments.join(", "),
                identity,
                marker
            ),
            names,
        ))
    }

    /// `DELETE FROM <t> WHERE <id> = ?`.
    pub fn delete_by_id(&self, schema: &Schema, table: &str) -> Result<Statement> {
        ensure_columns(schema)?;
        let identity = schema.identity().name();
        Ok(Statement::new(
            format!(
                "DELETE FROM {} WHERE {} = {}",
                table, identity, self.config.placeholder
            ),
            vec![identity.to_string()],
        ))
    }

    /// `DELETE FROM <t>`.
    pub fn delete_all(&self, schema: &Schema, table: &str) -> Result<Statement> {
        ensure_columns(schema)?;
        Ok(Statement::new(format!("DELETE FROM {}", table), Vec::new()))
    }

    /// `DROP TABLE IF EXISTS <t>`.
    pub fn drop_table(&self, schema: &Schema, table: &str) -> Result<Statement> {
        ensure_columns(schema)?;
        Ok(Statement::new(
            format!("DROP TABLE IF EXISTS {}", table),
            Vec::new(),
        ))
    }

    fn column_definition(&self, column: &Column) -> String {
        let mut def = format!("{} {}", column.name(), render_type(column.column_type()));
        if column.is_identity() {
            def.push_str(" PRIMARY KEY");
            if !self.config.identity_suffix.is_empty() {
                def.push(' ');
                def.push_str(&self.config.identity_suffix);
            }
        }
        if let Some(table) = column.descriptor().references() {
            def.push_str(&format!(" REFERENCES {}({})", table, IDENTITY_COLUMN));
        }
        def
    }
}

fn render_type(column_type: &ColumnType) -> String {
    match column_type {
        ColumnType::Integer | ColumnType::ForeignKey { .. } => "INTEGER".to_string(),
        ColumnType::String { max_length } => format!("VARCHAR({})", max_length),
    }
}

fn ensure_columns(schema: &Schema) -> Result<()> {
    if schema.is_empty() || schema.data_columns().is_empty() {
        return Err(Error::schema(format!(
            "schema of {} has no columns besides its identity",
            schema.type_name()
        )));
    }
    Ok(())
}

fn known_column<'a>(schema: &'a Schema, name: &str) -> Result<&'a Column> {
    schema.column(name).ok_or_else(|| {
        Error::schema(format!(
            "unknown column {} for {}",
            name,
            schema.type_name()
        ))
    })
}

fn data_column_names(schema: &Schema) -> Vec<String> {
    schema
        .data_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}
