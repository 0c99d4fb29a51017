//! Table schema for Tillage records.

use super::column::Column;
use super::field::FieldDescriptor;
use crate::error::{Error, Result};
use crate::types::ColumnType;
use hashbrown::HashMap;

/// Name of the identity column added when a declaration has no primary key.
pub const IDENTITY_COLUMN: &str = "id";

/// Ordered column layout of one record type.
///
/// The identity column is always at position 0, followed by the declared
/// columns in declaration order. A schema is immutable once built.
#[derive(Clone, Debug)]
pub struct Schema {
    /// Record type name.
    type_name: String,
    /// Explicit table name, if declared.
    table_name: Option<String>,
    /// Columns, identity first.
    columns: Vec<Column>,
    /// Column name to position.
    positions: HashMap<String, usize>,
}

impl Schema {
    /// Returns the record type name.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the explicitly declared table name.
    #[inline]
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Returns all columns, identity first.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the number of columns including the identity.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns. Built schemas always have
    /// at least the identity column.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the identity column.
    #[inline]
    pub fn identity(&self) -> &Column {
        &self.columns[0]
    }

    /// Returns the columns assigned by the application (all but identity).
    #[inline]
    pub fn data_columns(&self) -> &[Column] {
        &self.columns[1..]
    }

    /// Gets a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|i| &self.columns[i])
    }

    /// Gets a column position by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name())
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.table_name == other.table_name
            && self.columns == other.columns
    }
}

impl Eq for Schema {}

/// Builder for creating schemas.
#[derive(Clone, Debug)]
pub struct SchemaBuilder {
    type_name: String,
    table_name: Option<String>,
    columns: Vec<Column>,
}

impl SchemaBuilder {
    /// Creates a new schema builder for the named record type.
    pub fn new(type_name: impl Into<String>) -> Result<Self> {
        let type_name = type_name.into();
        check_naming_rules(&type_name)?;
        Ok(Self {
            type_name,
            table_name: None,
            columns: Vec::new(),
        })
    }

    /// Sets an explicit table name.
    pub fn table_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_naming_rules(&name)?;
        self.table_name = Some(name);
        Ok(self)
    }

    /// Adds a column. Fails if the name is already taken.
    pub fn add_field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Result<Self> {
        let name = name.into();
        check_naming_rules(&name)?;
        if self.columns.iter().any(|c| c.name() == name) {
            return Err(Error::schema(format!("column already exists: {}", name)));
        }
        self.columns.push(Column::new(name, descriptor));
        Ok(self)
    }

    /// Adds a column, or replaces the descriptor of an existing column of
    /// the same name in place.
    pub fn set_field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Result<Self> {
        let name = name.into();
        check_naming_rules(&name)?;
        match self.columns.iter_mut().find(|c| c.name() == name) {
            Some(col) => col.set_descriptor(descriptor),
            None => self.columns.push(Column::new(name, descriptor)),
        }
        Ok(self)
    }

    /// Builds the schema, placing the identity column first.
    pub fn build(self) -> Result<Schema> {
        if self.columns.is_empty() {
            return Err(Error::schema(format!(
                "declaration of {} yields no columns",
                self.type_name
            )));
        }
        for col in &self.columns {
            col.descriptor().check(col.name())?;
        }

        let mut columns = self.columns;
        let primary: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_identity())
            .map(|(i, _)| i)
            .collect();

        match primary.as_slice() {
            [] => match columns.iter().position(|c| c.name() == IDENTITY_COLUMN) {
                // An undecorated integer `id` column is the identity.
                Some(i) if columns[i].column_type() == &ColumnType::Integer => {
                    let mut col = columns.remove(i);
                    let promoted = col.descriptor().clone().primary_key();
                    col.set_descriptor(promoted);
                    columns.insert(0, col);
                }
                Some(_) => {
                    return Err(Error::schema(format!(
                        "column {} of {} is reserved for the integer identity",
                        IDENTITY_COLUMN, self.type_name
                    )));
                }
                None => {
                    columns.insert(0, Column::new(IDENTITY_COLUMN, FieldDescriptor::identity()));
                }
            },
            [i] => {
                let col = columns.remove(*i);
                columns.insert(0, col);
            }
            [first, second, ..] => {
                return Err(Error::schema(format!(
                    "{} declares more than one primary key: {} and {}",
                    self.type_name,
                    columns[*first].name(),
                    columns[*second].name()
                )));
            }
        }

        let columns: Vec<Column> = columns
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.with_index(i))
            .collect();
        let positions = columns
            .iter()
            .map(|c| (c.name().to_string(), c.index()))
            .collect();

        Ok(Schema {
            type_name: self.type_name,
            table_name: self.table_name,
            columns,
            positions,
        })
    }
}

/// Validates a name follows identifier rules.
pub(crate) fn check_naming_rules(name: &str) -> Result<()> {
    let first = match name.chars().next() {
        Some(c) => c,
        None => return Err(Error::schema("name cannot be empty")),
    };
    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(Error::schema(format!(
            "name must start with letter or underscore: {}",
            name
        )));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Error::schema(format!(
            "name contains invalid characters: {}",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop() -> Schema {
        SchemaBuilder::new("Crop")
            .unwrap()
            .add_field("name", FieldDescriptor::string_with_len(50))
            .unwrap()
            .add_field(
                "season",
                FieldDescriptor::string_with_len(20).choices(["spring", "summer", "autumn", "winter"]),
            )
            .unwrap()
            .add_field("watering_frequency", FieldDescriptor::integer().min(1).max(10))
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_implicit_identity_first() {
        let schema = crop();
        assert_eq!(schema.type_name(), "Crop");
        assert_eq!(schema.len(), 4);
        assert_eq!(schema.identity().name(), "id");
        assert!(schema.identity().is_identity());
        let names: Vec<&str> = schema.column_names().collect();
        assert_eq!(names, vec!["id", "name", "season", "watering_frequency"]);
        assert_eq!(schema.data_columns().len(), 3);
    }

    #[test]
    fn test_column_lookup() {
        let schema = crop();
        assert_eq!(schema.position("season"), Some(2));
        assert_eq!(schema.column("season").unwrap().index(), 2);
        assert!(schema.column("unknown").is_none());
    }

    #[test]
    fn test_declared_primary_key_moves_first() {
        let schema = SchemaBuilder::new("Garden")
            .unwrap()
            .add_field("name", FieldDescriptor::string())
            .unwrap()
            .add_field("garden_id", FieldDescriptor::identity())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(schema.identity().name(), "garden_id");
        assert_eq!(schema.position("name"), Some(1));
    }

    #[test]
    fn test_plain_id_column_promoted() {
        let schema = SchemaBuilder::new("Action")
            .unwrap()
            .add_field("name", FieldDescriptor::string())
            .unwrap()
            .add_field("id", FieldDescriptor::integer())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(schema.len(), 2);
        assert!(schema.identity().is_identity());
        assert_eq!(schema.identity().name(), "id");
    }

    #[test]
    fn test_string_id_column_rejected() {
        let result = SchemaBuilder::new("Action")
            .unwrap()
            .add_field("id", FieldDescriptor::string())
            .unwrap()
            .build();
        assert!(result.unwrap_err().is_schema());
    }

    #[test]
    fn test_duplicate_primary_key() {
        let result = SchemaBuilder::new("Bed")
            .unwrap()
            .add_field("a", FieldDescriptor::identity())
            .unwrap()
            .add_field("b", FieldDescriptor::identity())
            .unwrap()
            .build();
        let err = result.unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("more than one primary key"));
    }

    #[test]
    fn test_empty_declaration() {
        let result = SchemaBuilder::new("Nothing").unwrap().build();
        assert!(result.unwrap_err().is_schema());
    }

    #[test]
    fn test_invalid_column_name() {
        let result = SchemaBuilder::new("Crop")
            .unwrap()
            .add_field("123invalid", FieldDescriptor::integer());
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_column() {
        let result = SchemaBuilder::new("Crop")
            .unwrap()
            .add_field("name", FieldDescriptor::string())
            .unwrap()
            .add_field("name", FieldDescriptor::string());
        assert!(result.is_err());
    }

    #[test]
    fn test_set_field_replaces_in_place() {
        let schema = SchemaBuilder::new("Crop")
            .unwrap()
            .add_field("name", FieldDescriptor::string())
            .unwrap()
            .add_field("season", FieldDescriptor::string())
            .unwrap()
            .set_field("name", FieldDescriptor::string_with_len(10))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(schema.position("name"), Some(1));
        assert_eq!(schema.column("name").unwrap().descriptor().max_length(), Some(10));
    }
}
