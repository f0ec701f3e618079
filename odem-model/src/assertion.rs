//! Low-level assertion primitives.
//!
//! Each check returns a bare [`Failure`]; callers decide which
//! [`OdemError`](odem_types::OdemError) kind wraps it. Messages are built
//! lazily so passing checks do not allocate.

use crate::Value;
use odem_types::{ErrorCode, Failure};
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Result of a single primitive check.
pub type Assertion = Result<(), Failure>;

fn check(ok: bool, code: ErrorCode, message: impl FnOnce() -> String) -> Assertion {
    if ok {
        Ok(())
    } else {
        Err(Failure::new(code, message()))
    }
}

/// Integer, or a finite float without a fractional part.
pub fn integerish(value: &Value, message: impl FnOnce() -> String) -> Assertion {
    check(value.as_i64().is_some(), ErrorCode::InvalidArgument, message)
}

pub fn numeric(value: &Value, message: impl FnOnce() -> String) -> Assertion {
    check(
        matches!(value, Value::Integer(_) | Value::Float(_)),
        ErrorCode::InvalidArgument,
        message,
    )
}

pub fn boolean(value: &Value, message: impl FnOnce() -> String) -> Assertion {
    check(matches!(value, Value::Bool(_)), ErrorCode::InvalidArgument, message)
}

pub fn string(value: &Value, message: impl FnOnce() -> String) -> Assertion {
    check(matches!(value, Value::String(_)), ErrorCode::InvalidArgument, message)
}

pub fn sequence(value: &Value, message: impl FnOnce() -> String) -> Assertion {
    check(matches!(value, Value::Array(_)), ErrorCode::InvalidArgument, message)
}

pub fn entity_instance(value: &Value, message: impl FnOnce() -> String) -> Assertion {
    check(matches!(value, Value::Entity(_)), ErrorCode::InvalidArgument, message)
}

pub fn not_empty(text: &str, message: impl FnOnce() -> String) -> Assertion {
    check(!text.is_empty(), ErrorCode::InvalidArgument, message)
}

pub fn same<T: PartialEq>(expected: &T, actual: &T, message: impl FnOnce() -> String) -> Assertion {
    check(expected == actual, ErrorCode::InvalidArgument, message)
}

/// `actual` must be one of `choices`.
pub fn choice<T, I>(actual: &T, choices: I, message: impl FnOnce() -> String) -> Assertion
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let found = choices.into_iter().any(|c| &c == actual);
    check(found, ErrorCode::InvalidArgument, message)
}

/// A method lookup must have resolved to something.
pub fn method_exists<T>(resolved: Option<T>, message: impl FnOnce() -> String) -> Result<T, Failure> {
    resolved.ok_or_else(|| Failure::new(ErrorCode::MethodMissing, message()))
}

/// A collection of `len` elements must hold exactly `expected`.
pub fn count(len: usize, expected: usize, message: impl FnOnce() -> String) -> Assertion {
    check(len == expected, ErrorCode::InvalidArrayCount, message)
}

pub fn key_exists<K, Q, V>(map: &BTreeMap<K, V>, key: &Q, message: impl FnOnce() -> String) -> Assertion
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    check(map.contains_key(key), ErrorCode::InvalidArgument, message)
}

pub fn key_not_exists<K, Q, V>(
    map: &BTreeMap<K, V>,
    key: &Q,
    message: impl FnOnce() -> String,
) -> Assertion
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    check(!map.contains_key(key), ErrorCode::KeyAlreadyExists, message)
}

/// Inclusive numeric bounds; an absent bound is unbounded.
pub fn range(
    value: f64,
    min: Option<f64>,
    max: Option<f64>,
    message: impl FnOnce() -> String,
) -> Assertion {
    let above_min = min.is_none_or(|m| value >= m);
    let below_max = max.is_none_or(|m| value <= m);
    check(above_min && below_max, ErrorCode::InvalidArgument, message)
}

/// Inclusive length bounds.
pub fn length(
    len: usize,
    min: Option<usize>,
    max: Option<usize>,
    message: impl FnOnce() -> String,
) -> Assertion {
    let long_enough = min.is_none_or(|m| len >= m);
    let short_enough = max.is_none_or(|m| len <= m);
    check(long_enough && short_enough, ErrorCode::InvalidArgument, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integerish_accepts_whole_floats_only() {
        assert!(integerish(&Value::Integer(3), String::new).is_ok());
        assert!(integerish(&Value::Float(3.0), String::new).is_ok());
        assert!(integerish(&Value::Float(3.5), String::new).is_err());
        assert!(integerish(&Value::Float(f64::NAN), String::new).is_err());
        assert!(integerish(&Value::from("3"), String::new).is_err());
    }

    #[test]
    fn count_failure_carries_array_count_code() {
        let failure = count(2, 1, || "bad count".into()).unwrap_err();
        assert_eq!(failure.code, ErrorCode::InvalidArrayCount);
        assert_eq!(failure.message, "bad count");
    }

    #[test]
    fn key_not_exists_failure_carries_key_code() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1);
        let failure = key_not_exists(&map, "a", || "dup".into()).unwrap_err();
        assert_eq!(failure.code, ErrorCode::KeyAlreadyExists);
        assert!(key_not_exists(&map, "b", String::new).is_ok());
    }

    #[test]
    fn method_exists_failure_carries_method_code() {
        assert_eq!(method_exists(Some(7), String::new).unwrap(), 7);
        let failure = method_exists::<u8>(None, || "no such method".into()).unwrap_err();
        assert_eq!(failure.code, ErrorCode::MethodMissing);
        assert_eq!(failure.message, "no such method");
    }

    #[test]
    fn integerish_rejects_floats_beyond_i64() {
        assert!(integerish(&Value::Float(1e19), String::new).is_err());
        assert!(integerish(&Value::Float(-1e19), String::new).is_err());
        assert!(integerish(&Value::Float(-9_223_372_036_854_775_808.0), String::new).is_ok());
        assert!(integerish(&Value::Float(9_223_372_036_854_775_808.0), String::new).is_err());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(range(1.0, Some(1.0), Some(2.0), String::new).is_ok());
        assert!(range(2.0, Some(1.0), Some(2.0), String::new).is_ok());
        assert!(range(2.5, Some(1.0), Some(2.0), String::new).is_err());
        assert!(range(-9.0, None, None, String::new).is_ok());
    }

    #[test]
    fn choice_finds_member() {
        assert!(choice(&2, [1, 2, 3], String::new).is_ok());
        assert!(choice(&4, [1, 2, 3], String::new).is_err());
    }
}
