//! Tillage Testkit - Executors for exercising Tillage models in tests.
//!
//! - `IdSequence`: Explicit counter handing out mock identities
//! - `SpyExecutor`: Records every call and replays scripted outcomes
//! - `SqliteExecutor`: In-memory SQLite database behind the executor trait
//!
//! # Example
//!
//! ```rust
//! use tillage_core::{Executor, Value};
//! use tillage_testkit::{IdSequence, SpyExecutor};
//!
//! let mut spy = SpyExecutor::with_ids(IdSequence::new(7));
//! let outcome = spy
//!     .execute("INSERT INTO fertilizers (name, amount) VALUES (?, ?)", &["Compost".into(), 50.into()])
//!     .unwrap();
//!
//! assert_eq!(outcome.generated_id, Some(7));
//! assert_eq!(spy.last_call().unwrap().params, vec![Value::from("Compost"), Value::from(50)]);
//! ```

mod ids;
mod spy;
mod sqlite;

pub use ids::IdSequence;
pub use spy::{Call, ScriptedError, SpyExecutor};
pub use sqlite::SqliteExecutor;

pub use rusqlite;
