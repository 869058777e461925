//! Recursive descent over one schema document.

use super::TypeRegistry;
use crate::error::{Error, Result};
use crate::fieldpath::Path;
use crate::value::{Object, Scalar, SchemaNode};

/// Keywords whose alternatives all apply at the parent's path.
pub const COMBINATORS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

/// Key that declares a node's type.
pub const TYPE_KEY: &str = "type";

/// Key that holds array item schemas.
pub const ITEMS_KEY: &str = "items";

/// Returns true if `key` is one of `allOf`, `anyOf` or `oneOf`.
pub fn is_combinator(key: &str) -> bool {
    COMBINATORS.contains(&key)
}

/// Walker registers every type declared by one schema.
pub(crate) struct Walker<'a> {
    schema_index: usize,
    ignore_index: bool,
    registry: &'a mut TypeRegistry,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(schema_index: usize, ignore_index: bool, registry: &'a mut TypeRegistry) -> Self {
        Walker {
            schema_index,
            ignore_index,
            registry,
        }
    }

    /// Walks a whole schema document from the root path.
    pub(crate) fn walk_schema(&mut self, schema: &SchemaNode) -> Result<()> {
        let root = Path::new();
        let object = expect_object(schema, &root)?;
        self.walk(&root, object)
    }

    fn walk(&mut self, path: &Path, object: &Object) -> Result<()> {
        for (key, value) in object.iter() {
            if is_combinator(key) {
                self.expand_combinator(path, key, value)?;
            } else if let SchemaNode::Object(child) = value {
                self.walk(&path.with(key), child)?;
            } else if key == TYPE_KEY {
                self.register_type(path, value)?;
            } else if key == ITEMS_KEY {
                // A single `items` schema is an object and was handled above.
                if let SchemaNode::Array(items) = value {
                    self.expand_items(path, items)?;
                }
            }
        }
        Ok(())
    }

    /// Walks each alternative at the combinator's own path.
    fn expand_combinator(&mut self, path: &Path, keyword: &str, value: &SchemaNode) -> Result<()> {
        let alternatives = match value {
            SchemaNode::Array(alternatives) => alternatives,
            other => {
                return Err(Error::invalid_input(
                    path.with(keyword),
                    format!("{} must be an array of schemas, found {}", keyword, other.kind()),
                ))
            }
        };

        let location = path.with(keyword);
        for (i, alternative) in alternatives.iter().enumerate() {
            let object = expect_object(alternative, &location.with(i))?;
            self.walk(path, object)?;
        }
        Ok(())
    }

    /// Walks each tuple item under `items`, suffixed by its position unless
    /// indices are ignored.
    fn expand_items(&mut self, path: &Path, items: &[SchemaNode]) -> Result<()> {
        let base = path.with(ITEMS_KEY);
        for (i, item) in items.iter().enumerate() {
            let item_path = base.with(i);
            let object = expect_object(item, &item_path)?;
            if self.ignore_index {
                self.walk(&base, object)?;
            } else {
                self.walk(&item_path, object)?;
            }
        }
        Ok(())
    }

    fn register_type(&mut self, path: &Path, value: &SchemaNode) -> Result<()> {
        let declared_type = declared_type(path, value)?;
        self.registry
            .register(path, self.schema_index, &declared_type)?;
        Ok(())
    }
}

fn expect_object<'n>(node: &'n SchemaNode, path: &Path) -> Result<&'n Object> {
    match node {
        SchemaNode::Object(object) => Ok(object),
        other => Err(Error::invalid_input(
            path.clone(),
            format!("expected a schema object, found {}", other.kind()),
        )),
    }
}

/// Renders a `type` value. A list of type names is kept as its JSON text so
/// that two lists only match when they name the same types in the same order.
fn declared_type(path: &Path, value: &SchemaNode) -> Result<String> {
    match value {
        SchemaNode::Scalar(Scalar::String(name)) => Ok(name.clone()),
        SchemaNode::Array(items) => {
            let names = items
                .iter()
                .map(|item| {
                    item.as_str().ok_or_else(|| {
                        Error::invalid_input(
                            path.with(TYPE_KEY),
                            format!("type list entries must be strings, found {}", item.kind()),
                        )
                    })
                })
                .collect::<Result<Vec<&str>>>()?;
            Ok(serde_json::to_string(&names)?)
        }
        other => Err(Error::invalid_input(
            path.with(TYPE_KEY),
            format!("type must be a string or a list of strings, found {}", other.kind()),
        )),
    }
}
