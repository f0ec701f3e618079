//! Parsing of naming-convention accessor calls (`setFoo`, `getFoo`,
//! `addTags`, `isActive`).

use crate::assertion;
use odem_types::{Failure, OdemError, OdemResult};
use std::fmt;

/// What an accessor call does with its property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Set,
    Get,
    Add,
    Is,
}

impl Action {
    pub const ALL: [Action; 4] = [Self::Set, Self::Get, Self::Add, Self::Is];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Get => "get",
            Self::Add => "add",
            Self::Is => "is",
        }
    }

    /// Looks up the action for a lower-case method prefix.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == token)
    }

    /// Whether the action mutates the entity.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Self::Set | Self::Add)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accessor call split into its action and property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub action: Action,
    /// Property part of the method name, as written (`FooBar` for `setFooBar`).
    pub property: String,
}

impl MethodCall {
    /// Parses a method name such as `setFooBar`.
    ///
    /// The name is split before every ASCII upper-case letter. The first
    /// piece, lower-cased, is the action and the rest joined together is the
    /// property. A name without a property part, or with an unknown action,
    /// is a configuration error.
    pub fn parse(method: &str) -> OdemResult<Self> {
        let tokens = split_camel_case(method);

        if tokens.len() < 2 {
            return Err(OdemError::Configuration(Failure::invalid(format!(
                "Invalid method called: [{method}]"
            ))));
        }

        let token = tokens[0].to_ascii_lowercase();
        let action = assertion::method_exists(Action::from_token(&token), || {
            format!("Undefined method called: [{method}]")
        })
        .map_err(OdemError::Configuration)?;

        let property = tokens[1..].concat();
        assertion::not_empty(&property, || {
            "Expected 'property' to be a not empty string".to_string()
        })
        .map_err(OdemError::Configuration)?;

        Ok(Self { action, property })
    }
}

/// Splits before each ASCII upper-case letter. A leading upper-case letter
/// yields an empty first piece.
fn split_camel_case(method: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, c) in method.char_indices() {
        if c.is_ascii_uppercase() {
            tokens.push(&method[start..i]);
            start = i;
        }
    }

    tokens.push(&method[start..]);
    tokens
}
