//! Property-based tests for tillage-model using proptest.

mod common;

use common::{Crop, Fertilizer};
use proptest::prelude::*;
use tillage_model::{from_row, to_parameters, Model, Record, Row, Value};
use tillage_testkit::SpyExecutor;

fn crop() -> impl Strategy<Value = Crop> {
    (
        "[a-z][a-z ]{0,49}",
        prop::sample::select(vec!["spring", "summer", "autumn", "winter"]),
        prop::option::of(1i64..=14),
    )
        .prop_map(|(name, season, watering_frequency)| Crop {
            id: None,
            name,
            season: season.to_string(),
            watering_frequency,
        })
}

fn fertilizer() -> impl Strategy<Value = Fertilizer> {
    ("[A-Za-z]{1,100}", prop::option::of(0i64..=1000)).prop_map(|(name, amount)| Fertilizer {
        id: None,
        name,
        amount,
    })
}

fn round_trip<R: Record + Clone>(record: &R, id: i64) -> R {
    let schema = R::declaration().extract().unwrap();
    let mut values = vec![Value::Integer(id)];
    values.extend(to_parameters(record, &schema).unwrap());
    from_row(&Row::new(values), &schema).unwrap()
}

proptest! {
    /// A row built from a record's parameters maps back to the same record.
    #[test]
    fn crop_round_trips(original in crop(), id in 1i64..1_000_000) {
        let restored = round_trip(&original, id);
        let mut expected = original;
        expected.id = Some(id);
        prop_assert_eq!(restored, expected);
    }

    #[test]
    fn fertilizer_round_trips(original in fertilizer(), id in 1i64..1_000_000) {
        let restored = round_trip(&original, id);
        let mut expected = original;
        expected.id = Some(id);
        prop_assert_eq!(restored, expected);
    }

    /// Out-of-range amounts fail validation without touching the executor.
    #[test]
    fn out_of_range_amounts_never_execute(
        amount in prop_oneof![i64::MIN..0, 1001i64..i64::MAX],
    ) {
        let mut model: Model<Fertilizer, _> = Model::new(SpyExecutor::new()).unwrap();
        let mut record = Fertilizer::new("X", amount);
        prop_assert!(model.save(&mut record).unwrap_err().is_validation());
        prop_assert_eq!(model.executor().call_count(), 0);
        prop_assert_eq!(record.id, None);
    }
}
