//! Tillage Query - SQL statement synthesis for Tillage schemas.
//!
//! This crate turns a [`Schema`](tillage_core::schema::Schema) into SQL text:
//!
//! - `naming`: Table naming policy for record types
//! - `statement`: The `Statement` value handed to executors
//! - `synth`: `Synthesizer`, one method per statement kind
//!
//! Synthesis is pure: nothing here touches a database.
//!
//! # Example
//!
//! ```rust
//! use tillage_core::schema::Declaration;
//! use tillage_query::{table_name, Synthesizer};
//!
//! let schema = Declaration::new("Fertilizer")
//!     .text("name: charfield, max_length=100\namount: integerfield, min=0, max=1000")
//!     .extract()
//!     .unwrap();
//! let table = table_name(&schema);
//! let synth = Synthesizer::default();
//!
//! assert_eq!(
//!     synth.create_table(&schema, &table).unwrap().sql(),
//!     "CREATE TABLE IF NOT EXISTS fertilizers \
//!      (id INTEGER PRIMARY KEY, name VARCHAR(100), amount INTEGER)"
//! );
//!
//! let insert = synth.insert(&schema, &table).unwrap();
//! assert_eq!(insert.sql(), "INSERT INTO fertilizers (name, amount) VALUES (?, ?)");
//! assert_eq!(insert.bind_columns(), ["name", "amount"]);
//! ```

pub mod naming;
mod statement;
pub mod synth;

pub use naming::table_name;
pub use statement::Statement;
pub use synth::Synthesizer;
