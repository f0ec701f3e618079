//! Core type definitions for Odem.
//!
//! This crate defines the engine-agnostic vocabulary shared by the rest of
//! the workspace:
//! - [`PropertyType`], the closed set of declarable property types
//! - the error taxonomy ([`OdemError`], [`Failure`], [`ErrorCode`], [`ErrorKind`])
//!
//! Values, mappings and entities live in `odem-model`.

mod error;
mod property_type;

pub use error::{ErrorCode, ErrorKind, Failure, OdemError, OdemResult};
pub use property_type::PropertyType;
