//! Shape-checked field lookup over keyed maps
//!
//! [`FieldAccessor`] reads a field only if its runtime shape matches what the
//! caller asked for. The lenient lookups turn a mismatch into absence;
//! [`FieldAccessor::get_strict`] reports it instead.

use crate::keyed::Keyed;
use crate::node::GraphNode;
use std::marker::PhantomData;

/// A field was present with a shape other than the declared one
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{field}' expected {expected}, found {found}")]
pub struct FieldShapeMismatch {
    /// Field name
    pub field: String,
    /// Declared shape
    pub expected: &'static str,
    /// Shape actually found
    pub found: &'static str,
}

/// Typed read access to a keyed map of graph values
///
/// # Example
///
/// ```rust
/// use gqlmp_graph::FieldAccessor;
/// use serde_json::{json, Value};
///
/// let ops = json!({"query": "{ me }", "variables": 42});
/// let fields = FieldAccessor::wrap(ops.as_object().unwrap());
///
/// assert_eq!(fields.get("query", Value::as_str), Some("{ me }"));
/// assert_eq!(fields.get("variables", Value::as_object), None);
/// ```
pub struct FieldAccessor<'a, M, V> {
    map: &'a M,
    _value: PhantomData<fn() -> V>,
}

impl<'a, M, V> FieldAccessor<'a, M, V>
where
    M: Keyed<String, V>,
    V: GraphNode + 'a,
{
    /// Wrap a map
    #[inline]
    #[must_use]
    pub fn wrap(map: &'a M) -> Self {
        Self {
            map,
            _value: PhantomData,
        }
    }

    /// The wrapped map
    #[inline]
    #[must_use]
    pub fn map(&self) -> &'a M {
        self.map
    }

    /// Value at `key` when `shape` accepts it, otherwise `None`
    pub fn get<T>(&self, key: &str, shape: impl FnOnce(&'a V) -> Option<T>) -> Option<T> {
        self.get_or_else(key, shape, || None)
    }

    /// Value at `key` when `shape` accepts it
    ///
    /// An explicit null yields `None` without consulting `default`; a missing
    /// key or a mismatched shape falls back to `default`.
    pub fn get_or_else<T>(
        &self,
        key: &str,
        shape: impl FnOnce(&'a V) -> Option<T>,
        default: impl FnOnce() -> Option<T>,
    ) -> Option<T> {
        match self.map.lookup(key) {
            Some(value) if value.is_null() => None,
            Some(value) => shape(value).or_else(default),
            None => default(),
        }
    }

    /// Value at `key`, reporting a shape mismatch instead of hiding it
    ///
    /// Missing keys and explicit nulls are `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`FieldShapeMismatch`] if the value is present, non-null, and
    /// rejected by `shape`.
    pub fn get_strict<T>(
        &self,
        key: &str,
        expected: &'static str,
        shape: impl FnOnce(&'a V) -> Option<T>,
    ) -> Result<Option<T>, FieldShapeMismatch> {
        match self.map.lookup(key) {
            None => Ok(None),
            Some(value) if value.is_null() => Ok(None),
            Some(value) => shape(value).map(Some).ok_or_else(|| FieldShapeMismatch {
                field: key.to_owned(),
                expected,
                found: value.type_name(),
            }),
        }
    }
}
