//! Schema node types and document loading.

use crate::error::{Error, Result};
use crate::fieldpath::Path;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fs;

/// SchemaNode is one node of a parsed schema document.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A keyed mapping, e.g. a (sub)schema or a `properties` block.
    Object(Object),
    /// A sequence, e.g. tuple-style `items` or a combinator's alternatives.
    Array(Vec<SchemaNode>),
    /// A leaf value.
    Scalar(Scalar),
}

/// Scalar is a leaf value of a schema document.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Object is a mapping of field names to nodes, kept in document order.
///
/// Equality ignores key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: IndexMap<String, SchemaNode>,
}

impl SchemaNode {
    pub fn is_object(&self) -> bool {
        matches!(self, SchemaNode::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, SchemaNode::Array(_))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            SchemaNode::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SchemaNode::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns a short name for the node's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaNode::Object(_) => "object",
            SchemaNode::Array(_) => "array",
            SchemaNode::Scalar(Scalar::Null) => "null",
            SchemaNode::Scalar(Scalar::Bool(_)) => "boolean",
            SchemaNode::Scalar(Scalar::Int(_)) | SchemaNode::Scalar(Scalar::Float(_)) => "number",
            SchemaNode::Scalar(Scalar::String(_)) => "string",
        }
    }
}

impl Object {
    pub fn new() -> Self {
        Object {
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.entries.get(key)
    }

    /// Sets a field, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: SchemaNode) {
        self.entries.insert(key.into(), value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates fields in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, SchemaNode)> for Object {
    fn from_iter<T: IntoIterator<Item = (String, SchemaNode)>>(iter: T) -> Self {
        Object {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<serde_json::Value> for SchemaNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => SchemaNode::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => SchemaNode::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => SchemaNode::Scalar(Scalar::Int(i)),
                None => SchemaNode::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => SchemaNode::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                SchemaNode::Array(items.into_iter().map(SchemaNode::from).collect())
            }
            serde_json::Value::Object(map) => SchemaNode::Object(
                map.into_iter()
                    .map(|(k, v)| (k, SchemaNode::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<serde_yaml::Value> for SchemaNode {
    type Error = Error;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        yaml_to_node(value, &Path::new())
    }
}

fn yaml_to_node(value: serde_yaml::Value, path: &Path) -> Result<SchemaNode> {
    use serde_yaml::Value as Yaml;

    let node = match value {
        Yaml::Null => SchemaNode::Scalar(Scalar::Null),
        Yaml::Bool(b) => SchemaNode::Scalar(Scalar::Bool(b)),
        Yaml::Number(n) => match n.as_i64() {
            Some(i) => SchemaNode::Scalar(Scalar::Int(i)),
            None => SchemaNode::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        Yaml::String(s) => SchemaNode::Scalar(Scalar::String(s)),
        Yaml::Sequence(items) => SchemaNode::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| yaml_to_node(item, &path.with(i)))
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Object::new();
            for (key, value) in mapping {
                let key = yaml_key(key, path)?;
                let child = yaml_to_node(value, &path.with(key.as_str()))?;
                object.insert(key, child);
            }
            SchemaNode::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_node(tagged.value, path)?,
    };
    Ok(node)
}

fn yaml_key(key: serde_yaml::Value, path: &Path) -> Result<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value, path),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(Error::invalid_input(
            path.clone(),
            "mapping keys must be scalars",
        )),
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(SchemaNode::from)
    }
}

/// Parse a schema document from JSON.
pub fn from_json(json: &str) -> Result<SchemaNode> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(SchemaNode::from(value))
}

/// Parse a schema document from YAML.
pub fn from_yaml(yaml: &str) -> Result<SchemaNode> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    SchemaNode::try_from(value)
}

/// Load a schema document from disk.
///
/// Files ending in `.yaml` or `.yml` are read as YAML, everything else as JSON.
pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<SchemaNode> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => from_yaml(&content),
        _ => from_json(&content),
    }
}
