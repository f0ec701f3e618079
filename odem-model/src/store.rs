use crate::Value;
use std::collections::BTreeMap;

static NULL: Value = Value::Null;

/// Per-entity property storage.
///
/// Performs no validation of its own; the owning entity checks every value
/// before it gets here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityData {
    values: BTreeMap<String, Value>,
}

impl EntityData {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a value was stored under `key`, even an explicit `Null`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The stored value, or `Null` if nothing was stored.
    pub fn get(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&NULL)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Appends to the array under `key`, creating it first if needed.
    ///
    /// A stored non-array value (only ever `Null`) is replaced.
    pub fn append_to(&mut self, key: impl Into<String>, value: Value) {
        let slot = self
            .values
            .entry(key.into())
            .or_insert_with(|| Value::Array(Vec::new()));

        match slot {
            Value::Array(items) => items.push(value),
            other => *other = Value::Array(vec![value]),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
