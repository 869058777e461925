//! Field path module - Locates fields inside nested schema documents.
//!
//! A path is the sequence of mapping keys (and, when tuple indices are
//! tracked, `items` positions) walked from the schema root to a node.

mod path;

pub use path::*;
