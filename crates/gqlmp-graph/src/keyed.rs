//! Keyed collection abstraction
//!
//! [`Keyed`] lets the traverser, the join, and the field accessor work over
//! any string- or value-keyed map without caring which map type the caller
//! decoded into.

use indexmap::IndexMap;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Read/write lookup over a keyed collection
///
/// Lookups never insert. Presence is containment: a key mapped to a null
/// value is still present.
pub trait Keyed<K, V> {
    /// Look up a value by key
    fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized;

    /// Look up a value by key for in-place replacement
    fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized;

    /// Iterate entries in the collection's own order
    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a;

    /// Containment test
    #[inline]
    fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.lookup(key).is_some()
    }
}

impl<K, V, S> Keyed<K, V> for IndexMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.get(key)
    }

    fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.get_mut(key)
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }
}

impl<K, V, S> Keyed<K, V> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.get(key)
    }

    fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.get_mut(key)
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }
}

impl<K, V> Keyed<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.get(key)
    }

    fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.get_mut(key)
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }
}

impl Keyed<String, serde_json::Value> for serde_json::Map<String, serde_json::Value> {
    fn lookup<Q>(&self, key: &Q) -> Option<&serde_json::Value>
    where
        String: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.get(key)
    }

    fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut serde_json::Value>
    where
        String: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.get_mut(key)
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a String, &'a serde_json::Value)>
    where
        String: 'a,
        serde_json::Value: 'a,
    {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contains_sees_null_values() {
        let mut map = IndexMap::new();
        map.insert("fish".to_string(), None::<i32>);
        assert!(map.contains("fish"));
        assert!(!map.contains("bulb"));
    }

    #[test]
    fn lookup_mut_never_inserts() {
        let mut map: HashMap<String, i32> = HashMap::new();
        assert!(map.lookup_mut("missing").is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn btree_entries_are_sorted() {
        let map: BTreeMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        let keys: Vec<_> = map.entries().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    fn keys_of<'m, M, K, V>(map: &'m M) -> Vec<K>
    where
        M: Keyed<K, V>,
        K: Clone + 'm,
        V: 'm,
    {
        map.entries().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn entries_over_borrowed_keys_and_values() {
        let owned = vec!["b".to_string(), "a".to_string()];
        let map: IndexMap<&str, &String> = owned.iter().map(|s| (s.as_str(), s)).collect();
        assert_eq!(keys_of(&map), vec!["b", "a"]);

        let hashed: HashMap<&str, &String> = map.clone().into_iter().collect();
        assert_eq!(hashed.entries().count(), 2);
    }

    #[test]
    fn json_map_lookup() {
        let value = json!({"a": null, "b": 1});
        let map = value.as_object().unwrap();
        assert!(map.contains("a"));
        assert_eq!(map.lookup("b"), Some(&json!(1)));
    }
}
