//! Record mapping.
//!
//! Converts records to bind parameters (with coercion and validation) and
//! executor rows back to records. Nothing here performs I/O, so validation
//! failures never reach the database.

use crate::record::{Fields, Record};
use tillage_core::schema::{Column, Schema};
use tillage_core::{ColumnType, Error, Result, Row, Value};

/// Reads a record's non-identity columns in schema order, coerced and
/// validated against their descriptors.
pub fn to_parameters<R: Record>(record: &R, schema: &Schema) -> Result<Vec<Value>> {
    schema
        .data_columns()
        .iter()
        .map(|column| {
            let value = coerce(column, record.value(column.name()))?;
            validate(column, &value)?;
            Ok(value)
        })
        .collect()
}

/// Builds a record from a row whose values follow schema order, identity
/// first.
pub fn from_row<R: Record>(row: &Row, schema: &Schema) -> Result<R> {
    if row.len() != schema.len() {
        return Err(Error::mapping(format!(
            "row has {} values but {} has {} columns",
            row.len(),
            schema.type_name(),
            schema.len()
        )));
    }
    let id = match row.get(0) {
        Some(Value::Integer(id)) => *id,
        other => {
            return Err(Error::mapping(format!(
                "identity {} must be an integer, got {}",
                schema.identity().name(),
                other.map_or("nothing", Value::kind)
            )))
        }
    };
    let fields = Fields::new(schema, row.values(), id);
    let mut record = R::from_fields(&fields)?;
    record.set_id(id);
    Ok(record)
}

/// Converts a value to the storage type of its column.
fn coerce(column: &Column, value: Value) -> Result<Value> {
    match (column.column_type(), value) {
        (_, Value::Null) => Ok(Value::Null),
        (ColumnType::String { .. }, Value::Integer(v)) => Ok(Value::Text(v.to_string())),
        (ColumnType::Integer | ColumnType::ForeignKey { .. }, Value::Text(text)) => {
            text.trim().parse::<i64>().map(Value::Integer).map_err(|_| {
                Error::validation(
                    column.name(),
                    format!("expected an integer, got '{}'", text),
                )
            })
        }
        (_, value) => Ok(value),
    }
}

/// Checks a coerced value against its column's range, choices and length.
fn validate(column: &Column, value: &Value) -> Result<()> {
    let field = column.descriptor();
    if let Some(allowed) = field.allowed_values() {
        let permitted = value
            .as_str()
            .is_some_and(|v| allowed.iter().any(|a| a == v));
        if !permitted {
            return Err(Error::validation(
                column.name(),
                format!("{} is not one of: {}", value, allowed.join(", ")),
            ));
        }
    }
    match value {
        Value::Integer(v) => {
            if let Some(min) = field.min_value().filter(|min| v < min) {
                return Err(Error::validation(
                    column.name(),
                    format!("{} is below the minimum {}", v, min),
                ));
            }
            if let Some(max) = field.max_value().filter(|max| v > max) {
                return Err(Error::validation(
                    column.name(),
                    format!("{} is above the maximum {}", v, max),
                ));
            }
        }
        Value::Text(text) => {
            if let Some(max_length) = field.max_length() {
                let length = text.chars().count();
                if length > max_length {
                    return Err(Error::validation(
                        column.name(),
                        format!("length {} exceeds max_length {}", length, max_length),
                    ));
                }
            }
        }
        Value::Null => {}
    }
    Ok(())
}
