//! Tillage Core - Core types and schema extraction for the Tillage ORM.
//!
//! This crate provides the foundational types shared by the synthesizer and
//! the model facade:
//!
//! - `ColumnType`: Semantic column types (Integer, String, ForeignKey)
//! - `Value`: Runtime values bound as parameters or read back from rows
//! - `Row`: A positional row as returned by an executor
//! - `schema`: Field descriptors, schemas, declarations and the text grammar
//! - `Executor`: The boundary to the database collaborator
//! - `Config`: Statement rendering options
//! - `Error`: Error taxonomy for every ORM operation
//!
//! # Example
//!
//! ```rust
//! use tillage_core::schema::{Declaration, FieldDescriptor};
//!
//! let schema = Declaration::new("Fertilizer")
//!     .text(
//!         "name: charfield, max_length=100\n\
//!          amount: integerfield, min=0, max=1000",
//!     )
//!     .extract()
//!     .unwrap();
//!
//! // The identity column is always first.
//! assert_eq!(schema.identity().name(), "id");
//! assert_eq!(schema.len(), 3);
//! assert_eq!(
//!     schema.column("amount").unwrap().descriptor(),
//!     &FieldDescriptor::integer().min(0).max(1000)
//! );
//! ```

mod config;
mod error;
mod executor;
mod row;
pub mod schema;
mod types;
mod value;

pub use config::Config;
pub use error::{Error, ExecutorError, Result};
pub use executor::{ExecOutcome, Executor};
pub use row::Row;
pub use types::{ColumnType, Order};
pub use value::Value;
