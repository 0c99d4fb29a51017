//! The record trait and the field view used to rebuild records.

use tillage_core::schema::{Declaration, Schema};
use tillage_core::{Error, Result, Value};

/// An application type persisted through a [`Model`](crate::Model).
///
/// Implementors supply their declaration and plain accessors; every CRUD
/// operation comes from the generic facade.
///
/// ```rust
/// use tillage_core::schema::Declaration;
/// use tillage_core::{Result, Value};
/// use tillage_model::{Fields, Record};
///
/// #[derive(Debug, Default)]
/// struct Garden {
///     id: Option<i64>,
///     name: String,
/// }
///
/// impl Record for Garden {
///     fn declaration() -> Declaration {
///         Declaration::new("Garden").text("name: charfield, max_length=80")
///     }
///
///     fn id(&self) -> Option<i64> {
///         self.id
///     }
///
///     fn set_id(&mut self, id: i64) {
///         self.id = Some(id);
///     }
///
///     fn value(&self, column: &str) -> Value {
///         match column {
///             "name" => self.name.as_str().into(),
///             _ => Value::Null,
///         }
///     }
///
///     fn from_fields(fields: &Fields<'_>) -> Result<Self> {
///         Ok(Garden {
///             id: Some(fields.id()),
///             name: fields.require_text("name")?,
///         })
///     }
/// }
/// ```
pub trait Record: Sized + 'static {
    /// Declares the columns of this record type. Evaluated once per process.
    fn declaration() -> Declaration;

    /// Returns the identity, `None` until the record is saved.
    fn id(&self) -> Option<i64>;

    /// Stores the identity assigned by the database.
    fn set_id(&mut self, id: i64);

    /// Returns the current value of a declared column.
    fn value(&self, column: &str) -> Value;

    /// Builds a record from a row's fields.
    fn from_fields(fields: &Fields<'_>) -> Result<Self>;
}

/// Named view over one row, handed to [`Record::from_fields`].
#[derive(Clone, Copy, Debug)]
pub struct Fields<'a> {
    schema: &'a Schema,
    values: &'a [Value],
    id: i64,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(schema: &'a Schema, values: &'a [Value], id: i64) -> Self {
        Self { schema, values, id }
    }

    /// Returns the row's identity.
    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the schema the row was read with.
    #[inline]
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Gets a value by column name.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.schema
            .position(column)
            .and_then(|i| self.values.get(i))
    }

    /// Reads an optional integer column.
    pub fn integer(&self, column: &str) -> Result<Option<i64>> {
        match self.lookup(column)? {
            Value::Null => Ok(None),
            Value::Integer(v) => Ok(Some(*v)),
            other => Err(mismatch(column, "integer", other)),
        }
    }

    /// Reads an optional text column.
    pub fn text(&self, column: &str) -> Result<Option<String>> {
        match self.lookup(column)? {
            Value::Null => Ok(None),
            Value::Text(v) => Ok(Some(v.clone())),
            other => Err(mismatch(column, "text", other)),
        }
    }

    /// Reads an integer column that must not be null.
    pub fn require_integer(&self, column: &str) -> Result<i64> {
        self.integer(column)?
            .ok_or_else(|| Error::mapping(format!("column {} is null", column)))
    }

    /// Reads a text column that must not be null.
    pub fn require_text(&self, column: &str) -> Result<String> {
        self.text(column)?
            .ok_or_else(|| Error::mapping(format!("column {} is null", column)))
    }

    fn lookup(&self, column: &str) -> Result<&'a Value> {
        self.get(column).ok_or_else(|| {
            Error::mapping(format!(
                "column {} is not part of {}",
                column,
                self.schema.type_name()
            ))
        })
    }
}

fn mismatch(column: &str, expected: &str, got: &Value) -> Error {
    Error::mapping(format!(
        "column {} expected {}, got {}",
        column,
        expected,
        got.kind()
    ))
}
