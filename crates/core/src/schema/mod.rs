//! Schema module for Tillage.
//!
//! This module contains everything needed to turn a record type's
//! declaration into a schema: field descriptors, columns, the schema
//! builder and the text grammar adapter.

mod column;
mod declaration;
mod field;
pub mod grammar;
mod table;

pub use column::Column;
pub use declaration::{extract, Declaration};
pub use field::FieldDescriptor;
pub use table::{Schema, SchemaBuilder, IDENTITY_COLUMN};
