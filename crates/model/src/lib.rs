//! Tillage Model - Records and the CRUD facade for the Tillage ORM.
//!
//! - `Record`: Trait implemented by application types
//! - `mapper`: Record <-> parameter/row conversion with validation
//! - `SchemaRegistry`: Per-type schema cache and table ownership
//! - `Model`: Generic CRUD operations over an injected executor
//!
//! # Example
//!
//! ```rust
//! use tillage_core::schema::Declaration;
//! use tillage_core::{Result, Value};
//! use tillage_model::{Fields, Model, Record};
//! use tillage_testkit::SqliteExecutor;
//!
//! #[derive(Debug, PartialEq)]
//! struct Fertilizer {
//!     id: Option<i64>,
//!     name: String,
//!     amount: i64,
//! }
//!
//! impl Record for Fertilizer {
//!     fn declaration() -> Declaration {
//!         Declaration::new("Fertilizer").text(
//!             "name: charfield, max_length=100\n\
//!              amount: integerfield, min=0, max=1000",
//!         )
//!     }
//!
//!     fn id(&self) -> Option<i64> {
//!         self.id
//!     }
//!
//!     fn set_id(&mut self, id: i64) {
//!         self.id = Some(id);
//!     }
//!
//!     fn value(&self, column: &str) -> Value {
//!         match column {
//!             "name" => self.name.as_str().into(),
//!             "amount" => self.amount.into(),
//!             _ => Value::Null,
//!         }
//!     }
//!
//!     fn from_fields(fields: &Fields<'_>) -> Result<Self> {
//!         Ok(Fertilizer {
//!             id: Some(fields.id()),
//!             name: fields.require_text("name")?,
//!             amount: fields.require_integer("amount")?,
//!         })
//!     }
//! }
//!
//! let db = SqliteExecutor::open_in_memory().unwrap();
//! let mut fertilizers = Model::<Fertilizer, _>::new(db).unwrap();
//! fertilizers.create_table().unwrap();
//!
//! let mut compost = Fertilizer { id: None, name: "Compost".into(), amount: 50 };
//! fertilizers.save(&mut compost).unwrap();
//! assert_eq!(compost.id, Some(1));
//!
//! let found = fertilizers.get("name", "Compost").unwrap();
//! assert_eq!(found, Some(compost));
//! ```

mod mapper;
mod model;
mod record;
mod registry;

pub use mapper::{from_row, to_parameters};
pub use model::Model;
pub use record::{Fields, Record};
pub use registry::{Registered, SchemaRegistry};

pub use tillage_core::schema::{Declaration, FieldDescriptor, Schema};
pub use tillage_core::{Config, Error, ExecOutcome, Executor, ExecutorError, Order, Result, Row, Value};
