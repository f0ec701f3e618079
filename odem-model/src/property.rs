use crate::assertion;
use crate::{EffectiveMapping, EntityMapping, PropertyMapping, TypeRegistry, Value};
use odem_types::{Failure, OdemError, OdemResult, PropertyType};
use std::fmt;

/// Property-level checks run before an entity stores a value.
///
/// Every method has a default implementation; [`StandardAssertions`] uses
/// them all unchanged. Implement this trait only to tighten or relax a
/// specific check (e.g. stricter string validation for one entity type) and
/// attach it with [`Entity::with_assertions`](crate::Entity::with_assertions).
pub trait PropertyAssertion: fmt::Debug + Send + Sync {
    /// Asserts that `value` has the shape `property_type` requires.
    fn assert_value_is_type(&self, value: &Value, property_type: PropertyType) -> OdemResult<()> {
        let got = || value.type_name();
        let result = match property_type {
            PropertyType::Integer => {
                assertion::integerish(value, || format!("Expected integer value, got: {}", got()))
            }
            PropertyType::Float => {
                assertion::numeric(value, || format!("Expected float value, got: {}", got()))
            }
            PropertyType::Bool => {
                assertion::boolean(value, || format!("Expected boolean value, got: {}", got()))
            }
            PropertyType::String => {
                assertion::string(value, || format!("Expected string value, got: {}", got()))
            }
            PropertyType::Array => {
                assertion::sequence(value, || format!("Expected array value, got: {}", got()))
            }
            PropertyType::Entity => assertion::entity_instance(value, || {
                format!("Expected value of type [entity], got: {}", got())
            }),
        };

        result.map_err(OdemError::TypeMismatch)
    }

    /// Like [`assert_value_is_type`](Self::assert_value_is_type) for a raw
    /// type tag. Tags outside the closed set fail with
    /// [`OdemError::UnsupportedType`].
    fn assert_value_is_type_tag(&self, value: &Value, tag: &str) -> OdemResult<()> {
        let property_type: PropertyType = tag.parse()?;
        self.assert_value_is_type(value, property_type)
    }

    /// Asserts the mapping's type is registered and `value` matches it.
    fn assert_value_is_valid_for_mapping(
        &self,
        mapping: &PropertyMapping,
        registry: &TypeRegistry,
        value: &Value,
    ) -> OdemResult<()> {
        let property_type = mapping.property_type.ok_or_else(|| {
            OdemError::UnknownProperty(Failure::invalid("Mapping has no field [type]"))
        })?;

        self.assert_type_is_known(registry, property_type)?;
        self.assert_value_is_type(value, property_type)
    }

    /// Asserts that `property` is declared on the entity with a known type.
    fn assert_property_is_declared(
        &self,
        entity_mapping: &EntityMapping,
        registry: &TypeRegistry,
        property: &str,
        entity_name: &str,
    ) -> OdemResult<()> {
        assertion::key_exists(entity_mapping.properties(), property, || {
            format!("Property [{property}] is not defined in entity [{entity_name}]")
        })
        .map_err(OdemError::UnknownProperty)?;

        let property_type = entity_mapping
            .get(property)
            .and_then(|m| m.property_type)
            .ok_or_else(|| {
                OdemError::UnknownProperty(Failure::invalid(format!(
                    "Property [{property}] has no field [type] in entity [{entity_name}]"
                )))
            })?;

        self.assert_type_is_known(registry, property_type)
    }

    /// Asserts that `property_type` has registered defaults.
    fn assert_type_is_known(
        &self,
        registry: &TypeRegistry,
        property_type: PropertyType,
    ) -> OdemResult<()> {
        assertion::choice(&property_type, registry.types(), || {
            format!("Unknown property type: [{property_type}]")
        })
        .map_err(OdemError::UnknownProperty)
    }

    /// Asserts the numeric bounds, length bounds and entity class of the
    /// effective mapping. Values of the wrong shape are left to the type
    /// check.
    fn assert_value_satisfies_constraints(
        &self,
        mapping: &EffectiveMapping,
        value: &Value,
    ) -> OdemResult<()> {
        let fields = &mapping.fields;
        let result = match (mapping.property_type, value) {
            (PropertyType::Integer | PropertyType::Float, v) => match v.as_f64() {
                Some(n) => assertion::range(n, fields.min, fields.max, || {
                    format!(
                        "Value {n} is out of range [{}, {}]",
                        fields.min.unwrap_or(f64::NEG_INFINITY),
                        fields.max.unwrap_or(f64::INFINITY)
                    )
                }),
                None => Ok(()),
            },
            (PropertyType::String, Value::String(s)) => {
                let len = s.chars().count();
                assertion::length(len, fields.min_len, fields.max_len, || {
                    format!(
                        "String length {len} is out of range [{}, {}]",
                        fields.min_len.unwrap_or(0),
                        fields.max_len.map_or_else(|| "unbounded".to_string(), |m| m.to_string())
                    )
                })
            }
            (PropertyType::Entity, Value::Entity(entity)) => match &fields.class {
                Some(class) => assertion::same(&class.as_str(), &entity.name(), || {
                    format!(
                        "Expected entity of class [{class}], got: [{}]",
                        entity.name()
                    )
                }),
                None => Ok(()),
            },
            _ => Ok(()),
        };

        result.map_err(OdemError::TypeMismatch)
    }
}

/// The stock assertion service.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAssertions;

impl PropertyAssertion for StandardAssertions {}
