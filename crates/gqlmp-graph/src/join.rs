//! Inner join over keyed collections
//!
//! [`join`] pairs the entries of two keyed collections that share a key.
//! [`JoinedEntry`] carries the combinators used to reshape each side, e.g.
//! expanding "one file key → set of paths" into one entry per path.

use crate::keyed::Keyed;
use std::hash::Hash;

/// Entry present in both sides of a join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinedEntry<K, L, R> {
    /// Shared key
    pub key: K,
    /// Value from the left collection
    pub left: L,
    /// Value from the right collection
    pub right: R,
}

impl<K, L, R> JoinedEntry<K, L, R> {
    /// Create a joined entry
    #[inline]
    #[must_use]
    pub fn new(key: K, left: L, right: R) -> Self {
        Self { key, left, right }
    }

    /// Transform the left value, keeping key and right
    #[inline]
    pub fn map_left<T>(self, f: impl FnOnce(L) -> T) -> JoinedEntry<K, T, R> {
        JoinedEntry::new(self.key, f(self.left), self.right)
    }

    /// Transform the right value, keeping key and left
    #[inline]
    pub fn map_right<T>(self, f: impl FnOnce(R) -> T) -> JoinedEntry<K, L, T> {
        JoinedEntry::new(self.key, self.left, f(self.right))
    }

    /// Transform both values at once
    #[inline]
    pub fn map_values<T, U>(
        self,
        left: impl FnOnce(L) -> T,
        right: impl FnOnce(R) -> U,
    ) -> JoinedEntry<K, T, U> {
        JoinedEntry::new(self.key, left(self.left), right(self.right))
    }

    /// Expand the left value into one entry per produced item
    pub fn flat_map_left<I>(
        self,
        f: impl FnOnce(L) -> I,
    ) -> impl Iterator<Item = JoinedEntry<K, I::Item, R>>
    where
        I: IntoIterator,
        K: Clone,
        R: Clone,
    {
        let Self { key, left, right } = self;
        f(left)
            .into_iter()
            .map(move |item| JoinedEntry::new(key.clone(), item, right.clone()))
    }

    /// Expand the right value into one entry per produced item
    pub fn flat_map_right<I>(
        self,
        f: impl FnOnce(R) -> I,
    ) -> impl Iterator<Item = JoinedEntry<K, L, I::Item>>
    where
        I: IntoIterator,
        K: Clone,
        L: Clone,
    {
        let Self { key, left, right } = self;
        f(right)
            .into_iter()
            .map(move |item| JoinedEntry::new(key.clone(), left.clone(), item))
    }

    /// Split into `(key, left, right)`
    #[inline]
    pub fn into_parts(self) -> (K, L, R) {
        (self.key, self.left, self.right)
    }
}

/// Inner join of `left` and `right` on their keys
///
/// Only keys present in both collections are produced. Iteration follows the
/// left collection's own key order, so an order-preserving left side gives a
/// deterministic result.
pub fn join<'a, K, L, R, A, B>(
    left: &'a A,
    right: &'a B,
) -> impl Iterator<Item = JoinedEntry<&'a K, &'a L, &'a R>> + 'a
where
    K: Hash + Ord + 'a,
    L: 'a,
    R: 'a,
    A: Keyed<K, L> + 'a,
    B: Keyed<K, R> + 'a,
{
    left.entries()
        .filter_map(move |(key, l)| right.lookup(key).map(|r| JoinedEntry::new(key, l, r)))
}
