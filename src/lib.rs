//! # DoSchema
//!
//! Backward-compatibility checking for evolving JSON Schema documents.
//!
//! Given an ordered sequence of schema versions, doschema verifies that no
//! field path ever changes its declared `type`. Combinators (`allOf`, `anyOf`,
//! `oneOf`) are flattened onto their parent's path, and tuple-style `items`
//! lists are either collapsed onto one path or tracked per position.
//!
//! ```
//! use doschema::{check, value};
//!
//! let v1 = value::from_json(r#"{"properties": {"id": {"type": "string"}}}"#).unwrap();
//! let v2 = value::from_json(r#"{"properties": {"id": {"type": "integer"}}}"#).unwrap();
//!
//! let err = check(&[v1, v2], true).unwrap_err();
//! let conflict = err.as_incompatibility().unwrap();
//! assert_eq!(conflict.old_schema, 0);
//! assert_eq!(conflict.new_schema, 1);
//! ```
//!
//! ## Modules
//!
//! - [`fieldpath`] - Field paths locating nodes inside a schema document
//! - [`value`] - Schema documents and their JSON/YAML loaders
//! - [`compat`] - The type registry, schema walker and compatibility checker
//! - [`error`] - Error types

pub mod compat;
pub mod error;
pub mod fieldpath;
pub mod value;

pub use compat::{
    check, CheckOptions, Checker, CheckerBuilder, Incompatibility, TypeAssertion, TypeRegistry,
};
pub use error::{Error, Result};
pub use fieldpath::{Path, PathElement};
pub use value::SchemaNode;
