//! Container classification for graph values
//!
//! Every value met during traversal is classified once into a sequence, a
//! keyed map, or a scalar (anything else). [`GraphNode`] is implemented by
//! each concrete value tree the traverser works over.

use crate::keyed::Keyed;

/// Shared view of a classified value
pub enum Node<'a, V: GraphNode> {
    /// Ordered, index-addressed container
    Sequence(&'a [V]),
    /// String-keyed container
    Keyed(&'a V::Map),
    /// Anything that cannot be traversed into
    Scalar(&'a V),
}

/// Mutable view of a classified value
pub enum NodeMut<'a, V: GraphNode> {
    /// Ordered, index-addressed container (fixed length)
    Sequence(&'a mut [V]),
    /// String-keyed container
    Keyed(&'a mut V::Map),
    /// Anything that cannot be traversed into
    Scalar,
}

/// A value tree that can be walked by dotted paths
pub trait GraphNode: Sized {
    /// Keyed container type used by this value tree
    type Map: Keyed<String, Self>;

    /// Classify for reading
    fn classify(&self) -> Node<'_, Self>;

    /// Classify for in-place mutation
    fn classify_mut(&mut self) -> NodeMut<'_, Self>;

    /// Explicit null
    fn is_null(&self) -> bool;

    /// Short shape name used in diagnostics (`"string"`, `"object"`, ...)
    fn type_name(&self) -> &'static str;
}

impl GraphNode for serde_json::Value {
    type Map = serde_json::Map<String, serde_json::Value>;

    fn classify(&self) -> Node<'_, Self> {
        match self {
            Self::Array(items) => Node::Sequence(items),
            Self::Object(map) => Node::Keyed(map),
            other => Node::Scalar(other),
        }
    }

    fn classify_mut(&mut self) -> NodeMut<'_, Self> {
        match self {
            Self::Array(items) => NodeMut::Sequence(items),
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
            Self::Array(_) => "list",
            Self::Object(_) => "object",
        }
    }
}
