//! Property-based tests for tillage-query using proptest.

use proptest::prelude::*;
use tillage_core::schema::{Declaration, FieldDescriptor};
use tillage_query::Synthesizer;

fn descriptor() -> impl Strategy<Value = FieldDescriptor> {
    prop_oneof![
        (1usize..500).prop_map(FieldDescriptor::string_with_len),
        (-100i64..0, 0i64..100).prop_map(|(min, max)| FieldDescriptor::integer().min(min).max(max)),
        "[a-z]{1,8}".prop_map(|table| FieldDescriptor::foreign_key(table)),
    ]
}

fn declaration() -> impl Strategy<Value = Declaration> {
    prop::collection::btree_map("[a-z][a-z_]{0,10}", descriptor(), 1..12).prop_map(|fields| {
        fields
            .into_iter()
            .filter(|(name, _)| name != "id")
            .fold(Declaration::new("Record"), |decl, (name, field)| decl.field(name, field))
    })
}

proptest! {
    /// Extracting and synthesizing twice yields identical SQL.
    #[test]
    fn create_table_is_deterministic(decl in declaration()) {
        let synth = Synthesizer::default();
        match (decl.extract(), decl.extract()) {
            (Ok(a), Ok(b)) => {
                let first = synth.create_table(&a, "records").unwrap();
                let second = synth.create_table(&b, "records").unwrap();
                prop_assert_eq!(first, second);
            }
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "extraction is not idempotent"),
        }
    }

    /// Insert binds every non-identity column exactly once, in schema order.
    #[test]
    fn insert_binds_data_columns_in_order(decl in declaration()) {
        if let Ok(schema) = decl.extract() {
            let stmt = Synthesizer::default().insert(&schema, "records").unwrap();
            let expected: Vec<String> = schema
                .data_columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect();
            prop_assert_eq!(stmt.bind_columns(), expected.as_slice());
            prop_assert_eq!(stmt.sql().matches('?').count(), expected.len());
        }
    }

    /// Update binds the data columns followed by the identity.
    #[test]
    fn update_binds_identity_last(decl in declaration()) {
        if let Ok(schema) = decl.extract() {
            let stmt = Synthesizer::default().update_by_id(&schema, "records").unwrap();
            prop_assert_eq!(stmt.arity(), schema.len());
            prop_assert_eq!(stmt.bind_columns().last().map(String::as_str), Some("id"));
        }
    }
}
