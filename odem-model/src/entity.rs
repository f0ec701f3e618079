use crate::accessor::{Action, MethodCall};
use crate::assertion;
use crate::resolver;
use crate::{
    EffectiveMapping, EntityData, EntityMapping, MappingFields, PropertyAssertion,
    PropertyMapping, StandardAssertions, TypeRegistry, Value,
};
use odem_types::{OdemError, OdemResult, PropertyType};
use std::sync::Arc;
use tracing::{debug, trace};

/// Declares a concrete entity type.
///
/// ```
/// use odem_model::{
///     Entity, EntityDefinition, EntityMapping, ErrorKind, PropertyMapping, PropertyType, Value,
/// };
///
/// struct Foobar;
///
/// impl EntityDefinition for Foobar {
///     fn mapping(&self) -> EntityMapping {
///         EntityMapping::new()
///             .with("foo", PropertyMapping::new(PropertyType::Integer).min(1).max(1024))
///             .with("bar", PropertyMapping::new(PropertyType::Bool))
///     }
/// }
///
/// let mut foobar = Entity::new(&Foobar);
/// assert_eq!(foobar.name(), "Foobar");
///
/// foobar.set("foo", 42).unwrap().set("bar", true).unwrap();
/// assert_eq!(foobar.get("foo").unwrap(), &Value::Integer(42));
/// assert_eq!(foobar.call("isBar", &[Value::Null]).unwrap(), Some(Value::Bool(true)));
///
/// let err = foobar.set("foo", 2048).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::TypeMismatch);
/// assert_eq!(foobar.get("foo").unwrap(), &Value::Integer(42));
/// ```
pub trait EntityDefinition {
    /// The property mapping. Must return the same mapping on every call.
    fn mapping(&self) -> EntityMapping;

    /// Name used in diagnostics and for `class` checks. Defaults to the
    /// implementing type's name without its module path.
    fn entity_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>()).to_string()
    }
}

fn short_type_name(full: &str) -> &str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}

/// An entity instance: a declared mapping plus the values stored so far.
///
/// Writes go through [`set`](Self::set) and [`add`](Self::add), which
/// validate against the effective mapping before anything is stored, so a
/// rejected write leaves the entity untouched.
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    mapping: Arc<EntityMapping>,
    registry: Arc<TypeRegistry>,
    assertions: Arc<dyn PropertyAssertion>,
    data: EntityData,
}

impl Entity {
    /// Creates an empty entity using the shared built-in registry.
    pub fn new<D: EntityDefinition + ?Sized>(definition: &D) -> Self {
        Self::with_registry(definition, TypeRegistry::shared())
    }

    /// Creates an empty entity resolving types against `registry`.
    pub fn with_registry<D: EntityDefinition + ?Sized>(
        definition: &D,
        registry: Arc<TypeRegistry>,
    ) -> Self {
        Self {
            name: definition.entity_name(),
            mapping: Arc::new(definition.mapping()),
            registry,
            assertions: Arc::new(StandardAssertions),
            data: EntityData::new(),
        }
    }

    /// Replaces the assertion service.
    #[must_use]
    pub fn with_assertions(mut self, assertions: Arc<dyn PropertyAssertion>) -> Self {
        self.assertions = assertions;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mapping(&self) -> &EntityMapping {
        &self.mapping
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Read-only view of the stored values.
    pub fn data(&self) -> &EntityData {
        &self.data
    }

    // ── Mapping helpers ──────────────────────────────────────────────

    /// See [`resolve_property`](crate::resolve_property). Undeclared properties are
    /// reported with this entity's name.
    pub fn resolve_property(&self, property: &str, plain: bool) -> OdemResult<PropertyMapping> {
        self.assert_key_declared(property)?;
        resolver::resolve_property(&self.mapping, &self.registry, property, plain)
    }

    pub fn effective_mapping(&self, property: &str) -> OdemResult<EffectiveMapping> {
        self.assert_key_declared(property)?;
        resolver::effective_mapping(&self.mapping, &self.registry, property)
    }

    fn assert_key_declared(&self, property: &str) -> OdemResult<()> {
        assertion::key_exists(self.mapping.properties(), property, || {
            format!(
                "Property [{property}] is not defined in entity [{}]",
                self.name
            )
        })
        .map_err(OdemError::UnknownProperty)
    }

    pub fn default_mapping_for_type(&self, property_type: PropertyType) -> OdemResult<&MappingFields> {
        self.registry.lookup(property_type)
    }

    pub fn assert_property_is_declared(&self, property: &str) -> OdemResult<()> {
        self.assertions
            .assert_property_is_declared(&self.mapping, &self.registry, property, &self.name)
    }

    /// Checks `value` against the effective mapping of `property` without
    /// storing it.
    pub fn assert_value_is_valid_type(&self, property: &str, value: &Value) -> OdemResult<()> {
        let effective = self.effective_mapping(property)?;
        self.check_value(&effective, value)
    }

    fn check_value(&self, effective: &EffectiveMapping, value: &Value) -> OdemResult<()> {
        if value.is_null() && effective.nullable() {
            return Ok(());
        }

        self.assertions
            .assert_type_is_known(&self.registry, effective.property_type)?;
        self.assertions
            .assert_value_is_type(value, effective.property_type)?;
        self.assertions.assert_value_satisfies_constraints(effective, value)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Validates `value` against the property's effective mapping and stores it.
    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> OdemResult<&mut Self> {
        self.assert_property_is_declared(property)?;
        self.store(property, value.into())?;
        Ok(self)
    }

    /// `set` for a property already known to be declared.
    fn store(&mut self, property: &str, value: Value) -> OdemResult<()> {
        let effective = resolver::effective_mapping(&self.mapping, &self.registry, property)?;
        self.check_value(&effective, &value)?;

        trace!("{}.{} = {:?}", self.name, property, value);
        self.data.set(property, value);
        Ok(())
    }

    /// The stored value, or `Null` if the property was never set.
    pub fn get(&self, property: &str) -> OdemResult<&Value> {
        self.assert_property_is_declared(property)?;
        Ok(self.data.get(property))
    }

    /// Same as [`get`](Self::get); reads better for boolean properties.
    pub fn is(&self, property: &str) -> OdemResult<&Value> {
        self.get(property)
    }

    /// The stored value, or the mapping's `default` if the property was
    /// never set.
    pub fn get_or_default(&self, property: &str) -> OdemResult<Value> {
        self.assert_property_is_declared(property)?;
        if self.data.contains(property) {
            return Ok(self.data.get(property).clone());
        }

        let effective = resolver::effective_mapping(&self.mapping, &self.registry, property)?;
        Ok(effective.default_value())
    }

    /// True if a value was stored for `property`, even `Null`.
    pub fn contains(&self, property: &str) -> bool {
        self.data.contains(property)
    }

    /// Appends `value` to an `array` property after checking it against the
    /// property's `itemType`.
    pub fn add(&mut self, property: &str, value: impl Into<Value>) -> OdemResult<&mut Self> {
        self.assert_property_is_declared(property)?;
        self.append(property, value.into())?;
        Ok(self)
    }

    /// `add` for a property already known to be declared.
    fn append(&mut self, property: &str, value: Value) -> OdemResult<()> {
        let effective = resolver::effective_mapping(&self.mapping, &self.registry, property)?;
        let declared_type = effective.property_type;
        assertion::same(&PropertyType::Array, &declared_type, || {
            format!(
                "Adder function can only be called on properties of type array, \
                 but property [{property}] is defined as type [{declared_type}]"
            )
        })
        .map_err(OdemError::UnsupportedOperation)?;

        let item_type = effective.item_type();
        self.assertions.assert_value_is_type(&value, item_type)?;

        trace!("{}.{} += {:?}", self.name, property, value);
        self.data.append_to(property, value);
        Ok(())
    }

    // ── Naming-convention dispatch ───────────────────────────────────

    /// Dispatches a naming-convention accessor call with its arguments.
    ///
    /// `setFoo`/`addFoo` validate and mutate and return `None`;
    /// `getFoo`/`isFoo` return `Some` with the stored value (`Null` if
    /// unset). Every call takes exactly one argument, which the readers
    /// ignore. The property part of the name is matched against declared
    /// names as written, then with its first letter lower-cased.
    pub fn call(&mut self, method: &str, args: &[Value]) -> OdemResult<Option<Value>> {
        self.dispatch(method, args).inspect_err(|e| {
            debug!("Rejected accessor call {}::{}: {}", self.name, method, e);
        })
    }

    fn dispatch(&mut self, method: &str, args: &[Value]) -> OdemResult<Option<Value>> {
        let call = MethodCall::parse(method)?;

        assertion::count(args.len(), 1, || {
            format!("Invalid number of params, expected 1, got {}", args.len())
        })
        .map_err(OdemError::Configuration)?;

        let property = match self.mapping.find_accessor_property(&call.property) {
            Some(name) => name.to_string(),
            None => call.property,
        };
        self.assert_property_is_declared(&property)?;

        let value = args[0].clone();
        match call.action {
            Action::Set => {
                self.store(&property, value)?;
                Ok(None)
            }
            Action::Add => {
                self.append(&property, value)?;
                Ok(None)
            }
            Action::Get | Action::Is => Ok(Some(self.data.get(&property).clone())),
        }
    }
}

/// Two entities are equal when they have the same name and stored values.
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.data == other.data
    }
}

/// An entity declared by a mapping document rather than a Rust type.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicDefinition {
    name: String,
    mapping: EntityMapping,
}

impl DynamicDefinition {
    pub fn new(name: impl Into<String>, mapping: EntityMapping) -> Self {
        Self {
            name: name.into(),
            mapping,
        }
    }

    /// Builds a definition from a JSON mapping document.
    pub fn from_json(name: impl Into<String>, json: &str) -> OdemResult<Self> {
        Ok(Self::new(name, EntityMapping::from_json(json)?))
    }
}

impl EntityDefinition for DynamicDefinition {
    fn mapping(&self) -> EntityMapping {
        self.mapping.clone()
    }

    fn entity_name(&self) -> String {
        self.name.clone()
    }
}
