//! The closed set of property types an entity may declare.

use crate::{ErrorCode, Failure, OdemError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type tag of a declared property.
///
/// The set is closed: adding a type means adding a variant here, a default
/// constraint set in the registry and an arm in the type assertion switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Integer,
    Float,
    Bool,
    String,
    Array,
    Entity,
}

impl PropertyType {
    /// Every property type, in declaration order.
    pub const ALL: [PropertyType; 6] = [
        Self::Integer,
        Self::Float,
        Self::Bool,
        Self::String,
        Self::Array,
        Self::Entity,
    ];

    /// The lower-case tag used in mappings and messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Array => "array",
            Self::Entity => "entity",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = OdemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(OdemError::Configuration(Failure::new(
                ErrorCode::InvalidArgument,
                "Expected 'type' to be not empty",
            )));
        }

        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| OdemError::UnsupportedType(s.to_string()))
    }
}
