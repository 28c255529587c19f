//! Decoded `operations` value tree
//!
//! [`Value`] is a JSON-like tree that can also hold bound [`Upload`]
//! handles. Objects keep document order.

use crate::upload::Upload;
use gqlmp_graph::{GraphNode, Node, NodeMut, PathExpression, Reader};
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// Order-preserving object
pub type Object = IndexMap<String, Value>;

/// Node of the decoded operations tree
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Explicit null
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Number, kept as decoded
    Number(serde_json::Number),
    /// String
    String(String),
    /// Ordered list
    List(Vec<Value>),
    /// Object
    Object(Object),
    /// File handle bound into the tree by the decoder
    Upload(Upload),
}

impl Value {
    /// String content, if this is a string
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Number content, if this is a number
    #[must_use]
    pub fn as_number(&self) -> Option<&serde_json::Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// List items, if this is a list
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Object entries, if this is an object
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Mutable object entries, if this is an object
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Bound upload, if this is one
    #[must_use]
    pub fn as_upload(&self) -> Option<&Upload> {
        match self {
            Self::Upload(upload) => Some(upload),
            _ => None,
        }
    }

    /// Value addressed by a dotted path below this node
    #[must_use]
    pub fn at(&self, path: &PathExpression) -> Option<&Value> {
        Reader::over(self).get_path(path)
    }

    /// Every upload in the tree, depth first in document order
    #[must_use]
    pub fn uploads(&self) -> Vec<&Upload> {
        let mut found = Vec::new();
        self.collect_uploads(&mut found);
        found
    }

    fn collect_uploads<'a>(&'a self, found: &mut Vec<&'a Upload>) {
        match self {
            Self::Upload(upload) => found.push(upload),
            Self::List(items) => items.iter().for_each(|item| item.collect_uploads(found)),
            Self::Object(map) => map.values().for_each(|item| item.collect_uploads(found)),
            _ => {}
        }
    }
}

impl GraphNode for Value {
    type Map = Object;

    fn classify(&self) -> Node<'_, Self> {
        match self {
            Self::List(items) => Node::Sequence(items),
            Self::Object(map) => Node::Keyed(map),
            other => Node::Scalar(other),
        }
    }

    fn classify_mut(&mut self) -> NodeMut<'_, Self> {
        match self {
            Self::List(items) => NodeMut::Sequence(items),
            Self::Object(map) => NodeMut::Keyed(map),
            _ => NodeMut::Scalar,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
            Self::Upload(_) => "upload",
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Upload> for Value {
    fn from(upload: Upload) -> Self {
        Self::Upload(upload)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Self::Object(map)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = Object::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

impl Serialize for Value {
    /// Uploads are input-only and refuse to serialize
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Upload(upload) => Err(ser::Error::custom(format_args!(
                "upload '{}' cannot be serialized",
                upload.name()
            ))),
        }
    }
}
