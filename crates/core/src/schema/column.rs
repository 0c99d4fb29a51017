//! Column definition for Tillage schemas.

use super::field::FieldDescriptor;
use crate::types::ColumnType;

/// A named column of a schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    name: String,
    /// Type and constraints.
    descriptor: FieldDescriptor,
    /// Column index in the schema (0-based).
    index: usize,
}

impl Column {
    /// Creates a new column definition.
    pub fn new(name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            index: 0,
        }
    }

    /// Sets the column index.
    pub(crate) fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Replaces the descriptor, keeping name and position.
    pub(crate) fn set_descriptor(&mut self, descriptor: FieldDescriptor) {
        self.descriptor = descriptor;
    }

    /// Returns the column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field descriptor.
    #[inline]
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Returns the column type.
    #[inline]
    pub fn column_type(&self) -> &ColumnType {
        self.descriptor.column_type()
    }

    /// Returns the column index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns whether this column is the record identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.descriptor.is_primary_key()
    }
}
