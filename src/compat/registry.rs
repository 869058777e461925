//! Registry of declared types, keyed by field path.

use super::Incompatibility;
use crate::fieldpath::Path;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::trace;

/// TypeAssertion records that a schema declared a type at a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAssertion {
    /// Index of the first schema that declared a type at `path`.
    #[serde(rename = "schema")]
    pub origin_schema_index: usize,
    pub path: Path,
    #[serde(rename = "type")]
    pub declared_type: String,
}

impl TypeAssertion {
    pub fn new(origin_schema_index: usize, path: Path, declared_type: impl Into<String>) -> Self {
        TypeAssertion {
            origin_schema_index,
            path,
            declared_type: declared_type.into(),
        }
    }
}

/// TypeRegistry maps every field path that declared a type to its first
/// declaration.
///
/// An entry is written once and never replaced; later declarations at the
/// same path are only compared against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    assertions: BTreeMap<Path, TypeAssertion>,
    schema_count: usize,
}

impl TypeRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// Records `declared_type` at `path` for schema `schema_index`.
    ///
    /// Fails if the path already holds a different type. Re-declaring the
    /// same type is a no-op.
    pub fn register(
        &mut self,
        path: &Path,
        schema_index: usize,
        declared_type: &str,
    ) -> Result<(), Incompatibility> {
        match self.assertions.get(path) {
            Some(existing) if existing.declared_type != declared_type => Err(Incompatibility::new(
                path.clone(),
                existing.declared_type.clone(),
                existing.origin_schema_index,
                declared_type,
                schema_index,
            )),
            Some(_) => Ok(()),
            None => {
                trace!(path = %path, declared_type, schema = schema_index, "registered type");
                self.assertions.insert(
                    path.clone(),
                    TypeAssertion::new(schema_index, path.clone(), declared_type),
                );
                Ok(())
            }
        }
    }

    /// Returns the assertion recorded at `path`.
    pub fn get(&self, path: &Path) -> Option<&TypeAssertion> {
        self.assertions.get(path)
    }

    /// Returns the type recorded at `path`.
    pub fn declared_type(&self, path: &Path) -> Option<&str> {
        self.get(path).map(|a| a.declared_type.as_str())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.assertions.contains_key(path)
    }

    /// Returns the number of paths with a declared type.
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Returns the assertions sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = &TypeAssertion> {
        self.assertions.values()
    }

    /// Returns the registered paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.assertions.keys()
    }

    /// Returns how many schemas have been walked into this registry.
    ///
    /// This is also the index the next schema will be recorded under.
    pub fn schema_count(&self) -> usize {
        self.schema_count
    }

    pub(crate) fn finish_schema(&mut self) {
        self.schema_count += 1;
    }

    /// Drops every entry recorded by the schema currently being walked.
    ///
    /// Finished schemas all have indices below `schema_count`, so only the
    /// unfinished schema's entries can carry that index.
    pub(crate) fn discard_unfinished(&mut self) -> usize {
        let unfinished = self.schema_count;
        let before = self.assertions.len();
        self.assertions
            .retain(|_, assertion| assertion.origin_schema_index != unfinished);
        before - self.assertions.len()
    }
}

impl<'a> IntoIterator for &'a TypeRegistry {
    type Item = &'a TypeAssertion;
    type IntoIter = std::collections::btree_map::Values<'a, Path, TypeAssertion>;

    fn into_iter(self) -> Self::IntoIter {
        self.assertions.values()
    }
}

impl Serialize for TypeRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.assertions.values())
    }
}
