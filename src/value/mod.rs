//! Value module - In-memory representation of JSON/YAML schema documents.
//!
//! Schema documents are read-only inputs; the compatibility engine only
//! ever borrows them.

mod value;

pub use value::*;
