//! Type conflicts between schemas.

use crate::fieldpath::Path;
use serde::Serialize;
use std::fmt;

/// Incompatibility reports that a field path changed its declared type.
///
/// The "old" side is always the first schema that declared a type at the
/// path; the "new" side is the schema whose declaration disagreed with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incompatibility {
    /// The path at which the types disagree.
    pub field_path: Path,
    /// The type recorded first.
    pub old_type: String,
    /// Index of the schema that recorded `old_type`.
    pub old_schema: usize,
    /// The conflicting type.
    pub new_type: String,
    /// Index of the schema that declared `new_type`.
    pub new_schema: usize,
}

impl Incompatibility {
    /// Creates a new incompatibility.
    pub fn new(
        field_path: Path,
        old_type: impl Into<String>,
        old_schema: usize,
        new_type: impl Into<String>,
        new_schema: usize,
    ) -> Self {
        Incompatibility {
            field_path,
            old_type: old_type.into(),
            old_schema,
            new_type: new_type.into(),
            new_schema,
        }
    }

    /// Returns true if both declarations come from the same schema.
    pub fn is_within_schema(&self) -> bool {
        self.old_schema == self.new_schema
    }
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field {} already declared with type {} in schema {}; it cannot be declared as {} in schema {}",
            self.field_path, self.old_type, self.old_schema, self.new_type, self.new_schema
        )
    }
}

impl std::error::Error for Incompatibility {}
