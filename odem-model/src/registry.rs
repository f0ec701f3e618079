//! Type-mapping registry: default constraints per property type.

use crate::assertion;
use crate::{MappingFields, Value};
use odem_types::{Failure, OdemError, OdemResult, PropertyType};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Upper bound on string length in the built-in `string` defaults.
pub const MAX_STRING_LEN: usize = 2_147_483_647;

/// Bound used by the built-in `integer` and `float` defaults.
pub const MAX_NUMBER: f64 = i64::MAX as f64;

/// Default constraint sets keyed by property type.
///
/// A registry is filled once and then shared read-only (usually behind an
/// `Arc`). Only explicit duplicate registrations are errors; seeding the
/// built-ins is idempotent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeRegistry {
    defaults: BTreeMap<PropertyType, MappingFields>,
}

impl TypeRegistry {
    /// A registry with no types at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fresh registry holding the six built-in types.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.seed_builtins();
        registry
    }

    /// The process-wide built-in registry.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<TypeRegistry>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::builtin())).clone()
    }

    /// Seeds the built-in defaults into an empty registry.
    ///
    /// Does nothing if the registry already holds entries.
    pub fn seed_builtins(&mut self) {
        if !self.defaults.is_empty() {
            return;
        }

        self.defaults.extend(builtin_defaults());
        debug!("Seeded {} built-in property types", self.defaults.len());
    }

    /// Registers the defaults for a type.
    ///
    /// Fails if `defaults` does not say whether the type is nullable, or if
    /// the type is already registered. A failed call leaves the registry
    /// unchanged.
    pub fn register(
        &mut self,
        property_type: PropertyType,
        defaults: MappingFields,
    ) -> OdemResult<&mut Self> {
        if defaults.nullable.is_none() {
            return Err(OdemError::Configuration(Failure::invalid(
                "Mapping has no field [nullable]",
            )));
        }

        assertion::key_not_exists(&self.defaults, &property_type, || {
            format!("Mapping for type [{property_type}] already exists")
        })
        .map_err(OdemError::Configuration)?;

        debug!("Registered defaults for property type [{property_type}]");
        self.defaults.insert(property_type, defaults);
        Ok(self)
    }

    /// Registers the defaults for a type given as a raw tag.
    pub fn register_tag(&mut self, tag: &str, defaults: MappingFields) -> OdemResult<&mut Self> {
        assertion::not_empty(tag, || "Expected 'type' to be not empty".to_string())
            .map_err(OdemError::Configuration)?;
        let property_type: PropertyType = tag.parse()?;
        self.register(property_type, defaults)
    }

    /// The defaults registered for `property_type`.
    pub fn lookup(&self, property_type: PropertyType) -> OdemResult<&MappingFields> {
        self.defaults.get(&property_type).ok_or_else(|| {
            OdemError::UnknownProperty(Failure::invalid(format!(
                "No default mapping defined for type [{property_type}]"
            )))
        })
    }

    pub fn contains(&self, property_type: PropertyType) -> bool {
        self.defaults.contains_key(&property_type)
    }

    pub fn types(&self) -> impl Iterator<Item = PropertyType> + '_ {
        self.defaults.keys().copied()
    }

    /// Every registered type with its defaults.
    pub fn all(&self) -> &BTreeMap<PropertyType, MappingFields> {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

fn builtin_defaults() -> [(PropertyType, MappingFields); 6] {
    let number = MappingFields {
        nullable: Some(true),
        min: Some(-MAX_NUMBER),
        max: Some(MAX_NUMBER),
        default: Some(Value::Null),
        ..MappingFields::default()
    };

    [
        (PropertyType::Integer, number.clone()),
        (PropertyType::Float, number),
        (
            PropertyType::Bool,
            MappingFields {
                nullable: Some(false),
                default: Some(Value::Bool(false)),
                ..MappingFields::default()
            },
        ),
        (
            PropertyType::String,
            MappingFields {
                nullable: Some(true),
                min_len: Some(0),
                max_len: Some(MAX_STRING_LEN),
                default: Some(Value::Null),
                ..MappingFields::default()
            },
        ),
        (
            PropertyType::Array,
            MappingFields {
                nullable: Some(false),
                default: Some(Value::Array(Vec::new())),
                item_type: Some(PropertyType::String),
                ..MappingFields::default()
            },
        ),
        (
            PropertyType::Entity,
            MappingFields {
                nullable: Some(true),
                default: Some(Value::Null),
                class: None,
                ..MappingFields::default()
            },
        ),
    ]
}
