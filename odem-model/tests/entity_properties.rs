//! Property-based tests for entity accessors.
//!
//! These verify the properties that must hold for every value:
//! - Unset properties read as `Null`
//! - A value accepted by `set` reads back unchanged
//! - Integer properties take whole floats and reject fractional ones
//! - Rejected writes never change stored data

mod common;

use common::{foobar, profile};
use odem_model::{ErrorKind, Value, MAX_NUMBER};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

/// Numbers inside the built-in integer/float bounds.
fn bounded_f64() -> impl Strategy<Value = f64> {
    (-MAX_NUMBER..MAX_NUMBER).prop_filter("finite", |f| f.is_finite())
}

fn string_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 _-]{0,64}").unwrap()
}

/// A property of `Profile` paired with a value its mapping accepts.
fn valid_assignment() -> impl Strategy<Value = (&'static str, Value)> {
    prop_oneof![
        any::<i64>()
            .prop_filter("within bounds", |i| *i > i64::MIN)
            .prop_map(|i| ("age", Value::Integer(i))),
        bounded_f64().prop_map(|f| ("score", Value::Float(f))),
        any::<bool>().prop_map(|b| ("active", Value::Bool(b))),
        string_strategy().prop_map(|s| ("title", Value::String(s))),
        prop::collection::vec(string_strategy(), 0..8).prop_map(|v| ("tags", Value::from(v))),
        prop::collection::vec(any::<i64>(), 0..8).prop_map(|v| ("ratings", Value::from(v))),
    ]
}

// =============================================================================
// READ PROPERTIES
// =============================================================================

mod read_properties {
    use super::*;

    proptest! {
        /// Reading any declared property before a write yields Null
        #[test]
        fn unset_reads_null(index in 0usize..6) {
            let names = ["age", "score", "active", "title", "tags", "ratings"];
            let e = profile();
            prop_assert_eq!(e.get(names[index]).unwrap(), &Value::Null);
            prop_assert_eq!(e.is(names[index]).unwrap(), &Value::Null);
        }

        /// Undeclared names always fail as unknown properties
        #[test]
        fn undeclared_reads_fail(name in "[a-z]{1,12}") {
            prop_assume!(!["foo", "bar"].contains(&name.as_str()));
            let err = foobar().get(&name).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::UnknownProperty);
        }
    }
}

// =============================================================================
// WRITE PROPERTIES
// =============================================================================

mod write_properties {
    use super::*;

    proptest! {
        /// set followed by get returns the exact value
        #[test]
        fn set_get_roundtrip((property, value) in valid_assignment()) {
            let mut e = profile();
            e.set(property, value.clone()).unwrap();
            prop_assert_eq!(e.get(property).unwrap(), &value);
        }

        /// Whole floats are accepted by integer properties and stored as given
        #[test]
        fn whole_floats_are_integers(i in -1_000_000i64..1_000_000) {
            let mut e = profile();
            e.set("age", i as f64).unwrap();
            prop_assert_eq!(e.get("age").unwrap(), &Value::Float(i as f64));
        }

        /// Fractional floats are rejected by integer properties
        #[test]
        fn fractional_floats_are_not_integers(i in -1_000_000i64..1_000_000, frac in 0.01f64..0.99) {
            let mut e = profile();
            let err = e.set("age", i as f64 + frac).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::TypeMismatch);
            prop_assert!(!e.contains("age"));
        }

        /// A rejected write leaves the previous value in place
        #[test]
        fn rejected_write_keeps_previous(n in 1i64..=1024, bad in 1025i64..100_000) {
            let mut e = foobar();
            e.set("foo", n).unwrap();
            prop_assert!(e.set("foo", bad).is_err());
            prop_assert!(e.set("foo", "text").is_err());
            prop_assert_eq!(e.get("foo").unwrap(), &Value::Integer(n));
        }

        /// add accepts integers and rejects strings on an integer array
        #[test]
        fn add_enforces_item_type(items in prop::collection::vec(any::<i64>(), 1..16), s in string_strategy()) {
            let mut e = profile();
            for i in &items {
                e.add("ratings", *i).unwrap();
            }
            let err = e.add("ratings", s).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::TypeMismatch);
            prop_assert_eq!(e.get("ratings").unwrap(), &Value::from(items));
        }

        /// add on a non-array property is unsupported for any value
        #[test]
        fn add_on_integer_always_unsupported(i in any::<i64>()) {
            let err = foobar().add("foo", i).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        }
    }
}
