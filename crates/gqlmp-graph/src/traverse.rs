//! Safe traversal over nested sequence/map graphs
//!
//! A [`Traverser`] wraps one node of a value tree and exposes single-segment
//! `get`/`set`/`dereference` plus path-rooted `get_path`/`set_path`. Every
//! node is classified once into one of three variants:
//!
//! - [`SequenceAccess`]: segment must be a base-10 index within bounds
//! - [`KeyedAccess`]: segment is used as-is as the map key
//! - [`AbsentAccess`]: inert; every operation is a no-op and `dereference`
//!   returns `Absent` again
//!
//! Traversal never creates structure, never resizes a sequence, and never
//! panics. A write through a step that does not resolve is silently dropped.
//!
//! # Example
//!
//! ```rust
//! use gqlmp_graph::{PathExpression, Traverser};
//! use serde_json::json;
//!
//! let mut ops = json!({"variables": {"files": [null, null]}});
//! let path = PathExpression::from("variables.files.1");
//!
//! Traverser::over(&mut ops).set_path(&path, json!("upload"));
//! assert_eq!(ops["variables"]["files"][1], "upload");
//!
//! // Out of range: nothing happens
//! let prev = Traverser::over(&mut ops).set_path(&"variables.files.7".into(), json!(1));
//! assert!(prev.is_none());
//! ```

use crate::keyed::Keyed;
use crate::node::{GraphNode, Node, NodeMut};
use crate::path::PathExpression;
use std::fmt;

/// Single-segment capability shared by every traverser variant
pub trait SegmentAccess<'a, V: GraphNode> {
    /// Read the value at `segment`
    fn get(&self, segment: &str) -> Option<&V>;

    /// Replace the value at `segment`, returning the previous value
    ///
    /// Returns `None` (and leaves the container untouched) when the segment
    /// does not resolve.
    fn set(&mut self, segment: &str, value: V) -> Option<V>;

    /// Give up this accessor in exchange for the nested value at `segment`
    fn resolve(self, segment: &str) -> Option<&'a mut V>;

    /// Classify the nested value at `segment` into a new traverser
    fn dereference(self, segment: &str) -> Traverser<'a, V>
    where
        Self: Sized,
    {
        Traverser::wrap(self.resolve(segment))
    }
}

/// Parse a sequence index token
///
/// Accepts a base-10 integer in `0..len`; anything else is `None`.
#[inline]
fn index_in_bounds(segment: &str, len: usize) -> Option<usize> {
    segment
        .parse::<i64>()
        .ok()
        .and_then(|i| usize::try_from(i).ok())
        .filter(|i| *i < len)
}

/// Accessor over an ordered, fixed-length sequence
pub struct SequenceAccess<'a, V>(&'a mut [V]);

impl<'a, V: GraphNode> SegmentAccess<'a, V> for SequenceAccess<'a, V> {
    fn get(&self, segment: &str) -> Option<&V> {
        index_in_bounds(segment, self.0.len()).map(|i| &self.0[i])
    }

    fn set(&mut self, segment: &str, value: V) -> Option<V> {
        let i = index_in_bounds(segment, self.0.len())?;
        Some(std::mem::replace(&mut self.0[i], value))
    }

    fn resolve(self, segment: &str) -> Option<&'a mut V> {
        let i = index_in_bounds(segment, self.0.len())?;
        self.0.get_mut(i)
    }
}

/// Accessor over a string-keyed map
pub struct KeyedAccess<'a, V: GraphNode>(&'a mut V::Map);

impl<'a, V: GraphNode> SegmentAccess<'a, V> for KeyedAccess<'a, V> {
    fn get(&self, segment: &str) -> Option<&V> {
        self.0.lookup(segment)
    }

    fn set(&mut self, segment: &str, value: V) -> Option<V> {
        self.0
            .lookup_mut(segment)
            .map(|slot| std::mem::replace(slot, value))
    }

    fn resolve(self, segment: &str) -> Option<&'a mut V> {
        self.0.lookup_mut(segment)
    }
}

/// The inert traverser
///
/// Stateless; all instances are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AbsentAccess;

impl<'a, V: GraphNode> SegmentAccess<'a, V> for AbsentAccess {
    fn get(&self, segment: &str) -> Option<&V> {
        tracing::trace!(segment, "get on absent node ignored");
        None
    }

    fn set(&mut self, segment: &str, _value: V) -> Option<V> {
        tracing::trace!(segment, "set on absent node ignored");
        None
    }

    fn resolve(self, segment: &str) -> Option<&'a mut V> {
        tracing::trace!(segment, "dereference on absent node ignored");
        None
    }
}

/// Traverser over one node of a value tree
pub enum Traverser<'a, V: GraphNode> {
    /// Ordered sequence node
    Sequence(SequenceAccess<'a, V>),
    /// Keyed map node
    Keyed(KeyedAccess<'a, V>),
    /// No traversable structure
    Absent(AbsentAccess),
}

impl<'a, V: GraphNode> Traverser<'a, V> {
    /// The inert traverser
    pub const ABSENT: Self = Self::Absent(AbsentAccess);

    /// Classify an optional value: sequences and maps are traversable,
    /// everything else (scalars, nulls, nothing) is `Absent`
    #[must_use]
    pub fn wrap(value: Option<&'a mut V>) -> Self {
        match value.map(GraphNode::classify_mut) {
            Some(NodeMut::Sequence(items)) => Self::Sequence(SequenceAccess(items)),
            Some(NodeMut::Keyed(map)) => Self::Keyed(KeyedAccess(map)),
            Some(NodeMut::Scalar) | None => Self::ABSENT,
        }
    }

    /// Traverser rooted at `root`
    #[inline]
    #[must_use]
    pub fn over(root: &'a mut V) -> Self {
        Self::wrap(Some(root))
    }

    /// Traverser rooted at a bare keyed map
    #[inline]
    #[must_use]
    pub fn keyed(map: &'a mut V::Map) -> Self {
        Self::Keyed(KeyedAccess(map))
    }

    /// Traverser rooted at a bare sequence
    #[inline]
    #[must_use]
    pub fn sequence(items: &'a mut [V]) -> Self {
        Self::Sequence(SequenceAccess(items))
    }

    /// Check for the inert variant
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent(_))
    }

    /// Read the value at `segment`
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&V> {
        match self {
            Self::Sequence(access) => access.get(segment),
            Self::Keyed(access) => access.get(segment),
            Self::Absent(access) => SegmentAccess::<V>::get(access, segment),
        }
    }

    /// Replace the value at `segment`; see [`SegmentAccess::set`]
    pub fn set(&mut self, segment: &str, value: V) -> Option<V> {
        match self {
            Self::Sequence(access) => access.set(segment, value),
            Self::Keyed(access) => access.set(segment, value),
            Self::Absent(access) => access.set(segment, value),
        }
    }

    /// Step into the nested value at `segment`
    #[must_use]
    pub fn dereference(self, segment: &str) -> Self {
        match self {
            Self::Sequence(access) => access.dereference(segment),
            Self::Keyed(access) => access.dereference(segment),
            Self::Absent(access) => access.dereference(segment),
        }
    }

    /// Walk every segment of `path` (not the key)
    #[must_use]
    pub fn descend(self, path: &PathExpression) -> Self {
        path.segments()
            .iter()
            .fold(self, |node, segment| node.dereference(segment))
    }

    /// Read the value addressed by `path`
    #[must_use]
    pub fn get_path(self, path: &PathExpression) -> Option<&'a V> {
        let key = path.key()?;
        let target = match self.descend(path) {
            Self::Sequence(access) => access.resolve(key),
            Self::Keyed(access) => access.resolve(key),
            Self::Absent(access) => access.resolve(key),
        };
        target.map(|value| &*value)
    }

    /// Replace the value addressed by `path`, returning the previous value
    ///
    /// Returns `None` when the path is invalid or any step does not resolve;
    /// in that case the tree is unchanged.
    pub fn set_path(self, path: &PathExpression, value: V) -> Option<V> {
        let Some(key) = path.key() else {
            tracing::trace!(%path, "set through invalid path ignored");
            return None;
        };
        self.descend(path).set(key, value)
    }
}

impl<V: GraphNode> PartialEq for Traverser<'_, V> {
    /// Absent traversers are all equal; others are equal when they wrap the
    /// same container
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent(_), Self::Absent(_)) => true,
            (Self::Sequence(a), Self::Sequence(b)) => std::ptr::eq(&*a.0, &*b.0),
            (Self::Keyed(a), Self::Keyed(b)) => std::ptr::eq(&*a.0, &*b.0),
            _ => false,
        }
    }
}

impl<V: GraphNode> PartialEq<AbsentAccess> for Traverser<'_, V> {
    fn eq(&self, _other: &AbsentAccess) -> bool {
        self.is_absent()
    }
}

impl<V: GraphNode> fmt::Debug for Traverser<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(access) => f.debug_tuple("Sequence").field(&access.0.len()).finish(),
            Self::Keyed(access) => f
                .debug_tuple("Keyed")
                .field(&access.0.entries().count())
                .finish(),
            Self::Absent(_) => f.write_str("Absent"),
        }
    }
}

/// Read-only traversal over shared references
///
/// Mirrors [`Traverser`] for callers that only inspect a tree.
pub struct Reader<'a, V: GraphNode>(Option<&'a V>);

impl<V: GraphNode> Clone for Reader<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: GraphNode> Copy for Reader<'_, V> {}

impl<'a, V: GraphNode> Reader<'a, V> {
    /// Reader rooted at `root`
    #[inline]
    #[must_use]
    pub fn over(root: &'a V) -> Self {
        Self(Some(root))
    }

    /// Reader over an optional value; `None` reads nothing
    #[inline]
    #[must_use]
    pub fn wrap(value: Option<&'a V>) -> Self {
        Self(value)
    }

    /// Value at `segment` of the current node
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&'a V> {
        match self.0.map(GraphNode::classify)? {
            Node::Sequence(items) => index_in_bounds(segment, items.len()).map(|i| &items[i]),
            Node::Keyed(map) => map.lookup(segment),
            Node::Scalar(_) => None,
        }
    }

    /// Step into the nested value at `segment`
    #[must_use]
    pub fn dereference(self, segment: &str) -> Self {
        Self(self.get(segment))
    }

    /// Value addressed by `path`
    #[must_use]
    pub fn get_path(self, path: &PathExpression) -> Option<&'a V> {
        let key = path.key()?;
        path.segments()
            .iter()
            .fold(self, |node, segment| node.dereference(segment))
            .get(key)
    }

    /// The current node, if any
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.0
    }
}
