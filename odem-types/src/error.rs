//! Error taxonomy shared by every Odem crate.
//!
//! All assertion failures carry a [`Failure`]: a human-readable message and a
//! stable [`ErrorCode`]. The surrounding [`OdemError`] variant says which kind
//! of failure it is (declaration bug, unknown property, bad value, ...).

use std::fmt;
use thiserror::Error;

/// Result type for Odem operations.
pub type OdemResult<T> = Result<T, OdemError>;

/// Stable discriminator codes for assertion failures.
///
/// Only the structural checks get their own code; every type mismatch shares
/// [`ErrorCode::InvalidArgument`] and is told apart by its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Generic invalid-argument failure.
    InvalidArgument,
    /// A collection did not have the expected number of elements.
    InvalidArrayCount,
    /// A key that must be new was already present.
    KeyAlreadyExists,
    /// A method that was called does not exist.
    MethodMissing,
}

impl ErrorCode {
    /// Numeric value of the code, stable across releases.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        match self {
            Self::InvalidArgument => 0,
            Self::InvalidArrayCount => 1000,
            Self::KeyAlreadyExists => 1001,
            Self::MethodMissing => 1002,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// A failed assertion: what went wrong and under which code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub code: ErrorCode,
    pub message: String,
}

impl Failure {
    /// Creates a failure with an explicit code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a generic invalid-argument failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The category of an [`OdemError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    UnknownProperty,
    TypeMismatch,
    UnsupportedOperation,
    UnsupportedType,
}

/// Errors raised by the registry, the resolver and entity accessors.
#[derive(Debug, Error)]
pub enum OdemError {
    /// Malformed type registry input or an accessor call that cannot be parsed.
    #[error("configuration error: {0}")]
    Configuration(Failure),

    /// The property is not declared, or its declared type is not registered.
    #[error("unknown property: {0}")]
    UnknownProperty(Failure),

    /// A value does not satisfy its property's type or constraints.
    #[error("type mismatch: {0}")]
    TypeMismatch(Failure),

    /// `add` on a non-array property.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(Failure),

    /// A type tag outside the closed set reached the type switch.
    #[error("Assertion missing for property type: [{0}]")]
    UnsupportedType(String),

    /// A JSON mapping document could not be parsed.
    #[error("invalid mapping document: {0}")]
    InvalidMapping(#[from] serde_json::Error),
}

impl OdemError {
    /// The category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) | Self::InvalidMapping(_) => ErrorKind::Configuration,
            Self::UnknownProperty(_) => ErrorKind::UnknownProperty,
            Self::TypeMismatch(_) => ErrorKind::TypeMismatch,
            Self::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            Self::UnsupportedType(_) => ErrorKind::UnsupportedType,
        }
    }

    /// The stable failure code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration(f)
            | Self::UnknownProperty(f)
            | Self::TypeMismatch(f)
            | Self::UnsupportedOperation(f) => f.code,
            Self::UnsupportedType(_) | Self::InvalidMapping(_) => ErrorCode::InvalidArgument,
        }
    }

    /// The human-readable message, without the kind prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Configuration(f)
            | Self::UnknownProperty(f)
            | Self::TypeMismatch(f)
            | Self::UnsupportedOperation(f) => f.message.clone(),
            Self::UnsupportedType(tag) => format!("Assertion missing for property type: [{tag}]"),
            Self::InvalidMapping(e) => e.to_string(),
        }
    }
}
