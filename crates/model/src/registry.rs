//! Process-wide schema registry.
//!
//! Schemas are extracted lazily on first use of a record type and shared
//! read-only afterwards. The registry also owns table names, so two record
//! types can never resolve to the same table.

use crate::record::Record;
use hashbrown::HashMap;
use std::any::TypeId;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tillage_core::schema::Schema;
use tillage_core::{Error, Result};
use tillage_query::table_name;
use tracing::info;

/// A schema together with the table it maps to.
#[derive(Clone, Debug)]
pub struct Registered {
    schema: Arc<Schema>,
    table: Arc<str>,
}

impl Registered {
    /// Returns the schema.
    #[inline]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the table name.
    #[inline]
    pub fn table(&self) -> &Arc<str> {
        &self.table
    }
}

#[derive(Default)]
struct Entries {
    by_type: HashMap<TypeId, Registered>,
    tables: HashMap<Arc<str>, &'static str>,
}

/// Write-once, read-many cache of schemas keyed by record type.
#[derive(Default)]
pub struct SchemaRegistry {
    entries: RwLock<Entries>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static SchemaRegistry {
        static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();
        GLOBAL.get_or_init(SchemaRegistry::new)
    }

    /// Returns the schema of `R`, extracting it on first use.
    ///
    /// Failed extractions are not cached; the next call retries. Threads
    /// racing on first use may each extract, but only one schema is stored
    /// and every caller gets that one.
    pub fn schema_for<R: Record>(&self) -> Result<Registered> {
        let key = TypeId::of::<R>();
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = entries.by_type.get(&key) {
                return Ok(found.clone());
            }
        }

        // Extract outside the lock so a declaration may resolve other
        // record types through this registry.
        let schema = R::declaration().extract()?;
        let table: Arc<str> = Arc::from(table_name(&schema));

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have won the race.
        if let Some(found) = entries.by_type.get(&key) {
            return Ok(found.clone());
        }
        if let Some(owner) = entries.tables.get(&table) {
            return Err(Error::schema(format!(
                "table {} of {} is already used by {}",
                table,
                std::any::type_name::<R>(),
                owner
            )));
        }

        info!(
            type_name = schema.type_name(),
            table = %table,
            columns = schema.len(),
            "schema registered"
        );
        let registered = Registered {
            schema: Arc::new(schema),
            table: Arc::clone(&table),
        };
        entries.tables.insert(table, std::any::type_name::<R>());
        entries.by_type.insert(key, registered.clone());
        Ok(registered)
    }

    /// Returns true if `R` has been registered.
    pub fn contains<R: Record>(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_type
            .contains_key(&TypeId::of::<R>())
    }

    /// Number of registered record types.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_type
            .len()
    }

    /// Returns true if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("len", &self.len())
            .finish()
    }
}
