//! Schema-driven entity model for Odem.
//!
//! Entity types declare a property mapping; instances then only accept
//! values that satisfy it:
//! - [`TypeRegistry`]: default constraints per [`PropertyType`]
//! - [`EntityMapping`] / [`PropertyMapping`]: what an entity type declares
//! - [`resolve_property`]: declared fields overlaid on the type defaults
//! - [`PropertyAssertion`]: type and constraint checks run before a write
//! - [`Entity`]: validated `set` / `get` / `add` / `is`, plus naming-convention
//!   dispatch through [`Entity::call`] (`setFoo`, `getFoo`, `addTags`, ...)
//!
//! Entities live in memory only; nothing here persists or serializes them.

pub mod assertion;

mod accessor;
mod entity;
mod mapping;
mod property;
mod registry;
mod resolver;
mod store;
mod value;

pub use accessor::{Action, MethodCall};
pub use entity::{DynamicDefinition, Entity, EntityDefinition};
pub use mapping::{EffectiveMapping, EntityMapping, MappingFields, PropertyMapping};
pub use property::{PropertyAssertion, StandardAssertions};
pub use registry::{MAX_NUMBER, MAX_STRING_LEN, TypeRegistry};
pub use resolver::{effective_mapping, resolve_property};
pub use store::EntityData;
pub use value::Value;

pub use odem_types::{ErrorCode, ErrorKind, Failure, OdemError, OdemResult, PropertyType};
