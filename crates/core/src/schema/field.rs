//! Field descriptor for Tillage schemas.

use crate::error::{Error, Result};
use crate::types::{ColumnType, DEFAULT_MAX_LENGTH};

/// Type and constraints of one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Semantic column type.
    column_type: ColumnType,
    /// Whether this column is the primary key.
    primary_key: bool,
    /// Inclusive lower bound for integer columns.
    min_value: Option<i64>,
    /// Inclusive upper bound for integer columns.
    max_value: Option<i64>,
    /// Allowed values for string columns.
    allowed_values: Option<Vec<String>>,
}

impl FieldDescriptor {
    fn with_type(column_type: ColumnType) -> Self {
        Self {
            column_type,
            primary_key: false,
            min_value: None,
            max_value: None,
            allowed_values: None,
        }
    }

    /// Creates an integer column.
    pub fn integer() -> Self {
        Self::with_type(ColumnType::Integer)
    }

    /// Creates the integer primary key used as a record identity.
    pub fn identity() -> Self {
        Self::integer().primary_key()
    }

    /// Creates a string column bounded to 255 characters.
    pub fn string() -> Self {
        Self::string_with_len(DEFAULT_MAX_LENGTH)
    }

    /// Creates a string column bounded to `max_length` characters.
    pub fn string_with_len(max_length: usize) -> Self {
        Self::with_type(ColumnType::String { max_length })
    }

    /// Creates a foreign key referencing `table(id)`.
    pub fn foreign_key(table: impl Into<String>) -> Self {
        Self::with_type(ColumnType::ForeignKey {
            references: Some(table.into()),
        })
    }

    /// Creates a foreign key without a referenced table.
    pub(crate) fn dangling_foreign_key() -> Self {
        Self::with_type(ColumnType::ForeignKey { references: None })
    }

    /// Marks this column as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets the inclusive lower bound.
    pub fn min(mut self, value: i64) -> Self {
        self.min_value = Some(value);
        self
    }

    /// Sets the inclusive upper bound.
    pub fn max(mut self, value: i64) -> Self {
        self.max_value = Some(value);
        self
    }

    /// Restricts a string column to the given values.
    pub fn choices<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut allowed: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !allowed.contains(&value) {
                allowed.push(value);
            }
        }
        self.allowed_values = Some(allowed);
        self
    }

    /// Returns the column type.
    #[inline]
    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    /// Returns whether this column is the primary key.
    #[inline]
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Returns the lower bound.
    #[inline]
    pub fn min_value(&self) -> Option<i64> {
        self.min_value
    }

    /// Returns the upper bound.
    #[inline]
    pub fn max_value(&self) -> Option<i64> {
        self.max_value
    }

    /// Returns the allowed values, if restricted.
    pub fn allowed_values(&self) -> Option<&[String]> {
        self.allowed_values.as_deref()
    }

    /// Returns the maximum length of a string column.
    pub fn max_length(&self) -> Option<usize> {
        match self.column_type {
            ColumnType::String { max_length } => Some(max_length),
            _ => None,
        }
    }

    /// Returns the referenced table of a foreign key.
    pub fn references(&self) -> Option<&str> {
        match &self.column_type {
            ColumnType::ForeignKey { references } => references.as_deref(),
            _ => None,
        }
    }

    /// Checks the descriptor is internally consistent.
    pub(crate) fn check(&self, column: &str) -> Result<()> {
        if self.primary_key && self.column_type != ColumnType::Integer {
            return Err(Error::schema(format!(
                "primary key {} must be an integer column, got {}",
                column,
                self.column_type.kind()
            )));
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(Error::schema(format!(
                    "column {} has min {} greater than max {}",
                    column, min, max
                )));
            }
        }
        if (self.min_value.is_some() || self.max_value.is_some()) && !self.column_type.is_integer() {
            return Err(Error::schema(format!(
                "range bounds on non-integer column {}",
                column
            )));
        }
        match &self.column_type {
            ColumnType::String { max_length: 0 } => {
                return Err(Error::schema(format!(
                    "column {} has max_length 0",
                    column
                )));
            }
            ColumnType::ForeignKey {
                references: Some(table),
            } if table.trim().is_empty() => {
                return Err(Error::schema(format!(
                    "foreign key {} references an empty table name",
                    column
                )));
            }
            _ => {}
        }
        if let Some(allowed) = &self.allowed_values {
            if !matches!(self.column_type, ColumnType::String { .. }) {
                return Err(Error::schema(format!(
                    "choices on non-string column {}",
                    column
                )));
            }
            if allowed.is_empty() {
                return Err(Error::schema(format!(
                    "column {} declares an empty choices list",
                    column
                )));
            }
        }
        Ok(())
    }
}
