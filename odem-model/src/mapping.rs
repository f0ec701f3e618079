//! Declarative property mappings.
//!
//! A [`MappingFields`] set is used twice: as the default constraints the
//! registry holds per type, and as the overrides a property declares. An
//! [`EffectiveMapping`] is the former overlaid with the latter.

use crate::Value;
use odem_types::{OdemResult, PropertyType};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Constraint fields shared by type defaults and property declarations.
///
/// Every field is optional so a declaration only names what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingFields {
    #[serde(default)]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub min_len: Option<usize>,
    #[serde(default)]
    pub max_len: Option<usize>,
    #[serde(default)]
    pub item_type: Option<PropertyType>,
    /// Entity type name a nested entity must have. `None` leaves it unresolved.
    #[serde(default)]
    pub class: Option<String>,
}

impl MappingFields {
    /// Returns `self` with every field set in `overrides` replaced.
    #[must_use]
    pub fn overlay(&self, overrides: &MappingFields) -> MappingFields {
        MappingFields {
            nullable: overrides.nullable.or(self.nullable),
            min: overrides.min.or(self.min),
            max: overrides.max.or(self.max),
            default: overrides.default.clone().or_else(|| self.default.clone()),
            min_len: overrides.min_len.or(self.min_len),
            max_len: overrides.max_len.or(self.max_len),
            item_type: overrides.item_type.or(self.item_type),
            class: overrides.class.clone().or_else(|| self.class.clone()),
        }
    }
}

/// A single property as declared by an entity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PropertyMapping {
    /// Declared type. Kept optional so a missing type is reported, not assumed.
    #[serde(rename = "type", default)]
    pub property_type: Option<PropertyType>,
    #[serde(flatten)]
    pub fields: MappingFields,
}

impl PropertyMapping {
    /// Declares a property of the given type with no overrides.
    pub fn new(property_type: PropertyType) -> Self {
        Self {
            property_type: Some(property_type),
            fields: MappingFields::default(),
        }
    }

    /// A declaration with no type at all.
    pub fn untyped() -> Self {
        Self::default()
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.fields.nullable = Some(nullable);
        self
    }

    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.fields.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.fields.max = Some(max.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.fields.default = Some(default.into());
        self
    }

    pub fn min_len(mut self, min_len: usize) -> Self {
        self.fields.min_len = Some(min_len);
        self
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.fields.max_len = Some(max_len);
        self
    }

    pub fn item_type(mut self, item_type: PropertyType) -> Self {
        self.fields.item_type = Some(item_type);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.fields.class = Some(class.into());
        self
    }
}

/// The full property declaration of one entity type, keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct EntityMapping {
    properties: BTreeMap<String, PropertyMapping>,
}

impl EntityMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, mapping: PropertyMapping) -> Self {
        self.properties.insert(name.into(), mapping);
        self
    }

    /// Parses a mapping document such as
    /// `{"foo": {"type": "integer", "max": 1024}, "tags": {"type": "array", "itemType": "string"}}`.
    pub fn from_json(json: &str) -> OdemResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, mapping: PropertyMapping) {
        self.properties.insert(name.into(), mapping);
    }

    pub fn get(&self, name: &str) -> Option<&PropertyMapping> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyMapping)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn properties(&self) -> &BTreeMap<String, PropertyMapping> {
        &self.properties
    }

    /// Finds the declared property an accessor name refers to.
    ///
    /// `Foo` (from `setFoo`) matches a property declared `Foo`, or failing
    /// that one declared `foo`.
    pub fn find_accessor_property(&self, accessor_name: &str) -> Option<&str> {
        if let Some((name, _)) = self.properties.get_key_value(accessor_name) {
            return Some(name);
        }

        let mut chars = accessor_name.chars();
        let first = chars.next()?;
        let lowered: String = first.to_lowercase().chain(chars).collect();
        self.properties
            .get_key_value(lowered.as_str())
            .map(|(name, _)| name.as_str())
    }
}

/// Type defaults overlaid with a property's declared overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveMapping {
    pub property_type: PropertyType,
    pub fields: MappingFields,
}

impl EffectiveMapping {
    /// Whether `Null` may be stored. Undeclared nullability means no.
    pub fn nullable(&self) -> bool {
        self.fields.nullable.unwrap_or(false)
    }

    /// Element type for arrays, `string` unless declared otherwise.
    pub fn item_type(&self) -> PropertyType {
        self.fields.item_type.unwrap_or(PropertyType::String)
    }

    /// The declared default, or `Null`.
    pub fn default_value(&self) -> Value {
        self.fields.default.clone().unwrap_or_default()
    }
}
