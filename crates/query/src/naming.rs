//! Table naming policy.
//!
//! A schema's table is its explicit table name when one was declared.
//! Otherwise the record type name is converted to snake_case and suffixed
//! with `s`: `Fertilizer` becomes `fertilizers`, `GardenEmployee` becomes
//! `garden_employees`. Word boundaries are kept on purpose, where a plain
//! lower-cased plural would give `gardenemployees`. The policy is
//! deterministic; the model registry rejects two types that resolve to the
//! same table.

use convert_case::{Case, Casing};
use tillage_core::schema::Schema;

/// Returns the table name for a schema.
pub fn table_name(schema: &Schema) -> String {
    match schema.table_name() {
        Some(name) => name.to_string(),
        None => derived_table_name(schema.type_name()),
    }
}

/// Derives a table name from a record type name.
pub fn derived_table_name(type_name: &str) -> String {
    let mut name = type_name.to_case(Case::Snake);
    name.push('s');
    name
}
