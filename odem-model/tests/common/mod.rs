//! Shared entity fixtures for model tests.

#![allow(dead_code)]

use odem_model::{Entity, EntityDefinition, EntityMapping, PropertyMapping, PropertyType};

/// The example entity: a bounded integer and a flag.
pub struct Foobar;

impl EntityDefinition for Foobar {
    fn mapping(&self) -> EntityMapping {
        EntityMapping::new()
            .with(
                "foo",
                PropertyMapping::new(PropertyType::Integer)
                    .nullable(false)
                    .min(1)
                    .max(1024),
            )
            .with("bar", PropertyMapping::new(PropertyType::Bool))
    }
}

/// An entity exercising every property type.
pub struct Profile;

impl EntityDefinition for Profile {
    fn mapping(&self) -> EntityMapping {
        EntityMapping::new()
            .with("age", PropertyMapping::new(PropertyType::Integer))
            .with("score", PropertyMapping::new(PropertyType::Float))
            .with("active", PropertyMapping::new(PropertyType::Bool))
            .with(
                "nickname",
                PropertyMapping::new(PropertyType::String).min_len(2).max_len(8),
            )
            .with("title", PropertyMapping::new(PropertyType::String))
            .with("tags", PropertyMapping::new(PropertyType::Array))
            .with(
                "ratings",
                PropertyMapping::new(PropertyType::Array).item_type(PropertyType::Integer),
            )
            .with("friend", PropertyMapping::new(PropertyType::Entity))
            .with(
                "buddy",
                PropertyMapping::new(PropertyType::Entity).class("Foobar"),
            )
            .with("FooBar", PropertyMapping::new(PropertyType::String))
            .with("broken", PropertyMapping::untyped())
    }
}

pub fn foobar() -> Entity {
    Entity::new(&Foobar)
}

pub fn profile() -> Entity {
    Entity::new(&Profile)
}
