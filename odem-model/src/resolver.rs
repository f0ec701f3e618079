//! Resolution of a declared property to its effective mapping.

use crate::{EffectiveMapping, EntityMapping, PropertyMapping, TypeRegistry};
use odem_types::{Failure, OdemError, OdemResult};

/// Returns the mapping of `property`.
///
/// With `plain` the declared fragment comes back verbatim. Otherwise the
/// defaults of the property's type are overlaid with the declared fields,
/// the declared value winning wherever both set a field.
pub fn resolve_property(
    entity_mapping: &EntityMapping,
    registry: &TypeRegistry,
    property: &str,
    plain: bool,
) -> OdemResult<PropertyMapping> {
    let declared = declared(entity_mapping, property)?;
    if plain {
        return Ok(declared.clone());
    }

    let effective = merge(declared, registry, property)?;
    Ok(PropertyMapping {
        property_type: Some(effective.property_type),
        fields: effective.fields,
    })
}

/// Typed form of [`resolve_property`] without `plain`.
pub fn effective_mapping(
    entity_mapping: &EntityMapping,
    registry: &TypeRegistry,
    property: &str,
) -> OdemResult<EffectiveMapping> {
    merge(declared(entity_mapping, property)?, registry, property)
}

fn declared<'a>(entity_mapping: &'a EntityMapping, property: &str) -> OdemResult<&'a PropertyMapping> {
    entity_mapping.get(property).ok_or_else(|| {
        OdemError::UnknownProperty(Failure::invalid(format!(
            "Property [{property}] not defined in this entity"
        )))
    })
}

fn merge(
    declared: &PropertyMapping,
    registry: &TypeRegistry,
    property: &str,
) -> OdemResult<EffectiveMapping> {
    let property_type = declared.property_type.ok_or_else(|| {
        OdemError::UnknownProperty(Failure::invalid(format!(
            "Property [{property}] has no field [type]"
        )))
    })?;

    let defaults = registry.lookup(property_type)?;
    Ok(EffectiveMapping {
        property_type,
        fields: defaults.overlay(&declared.fields),
    })
}
