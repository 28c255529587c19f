//! Property tests for path parsing, sequence bounds, absent traversal and joins

use gqlmp_graph::{join, PathExpression, Reader, Traverser};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeMap;

fn token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,8}"
}

proptest! {
    #[test]
    fn prop_parse_splits_last_token_as_key(tokens in proptest::collection::vec(token(), 1..6)) {
        let raw = tokens.join(".");
        let path = PathExpression::from(raw.as_str());

        prop_assert!(path.is_valid());
        prop_assert_eq!(path.key(), tokens.last().map(String::as_str));
        prop_assert_eq!(path.segments(), &tokens[..tokens.len() - 1]);
    }

    #[test]
    fn prop_same_string_same_path(raw in "[a-z.]{0,12}") {
        prop_assert_eq!(PathExpression::from(raw.as_str()), PathExpression::from(raw.as_str()));
    }

    #[test]
    fn prop_sequence_never_resizes(len in 0usize..6, segment in ".{0,6}") {
        let mut items: Vec<Value> = (0..len).map(|i| json!(i)).collect();
        let before = items.clone();

        let prev = Traverser::sequence(&mut items).set(&segment, json!("x"));

        prop_assert_eq!(items.len(), before.len());
        match segment.parse::<usize>() {
            Ok(i) if i < len => {
                prop_assert_eq!(prev, Some(json!(i)));
                prop_assert_eq!(&items[i], &json!("x"));
            }
            _ => {
                // Signed forms such as "+0" resolve like their unsigned value
                let signed = segment
                    .parse::<i64>()
                    .ok()
                    .and_then(|i| usize::try_from(i).ok())
                    .filter(|i| *i < len);
                match signed {
                    Some(i) => {
                        prop_assert_eq!(prev, Some(json!(i)));
                        for (j, item) in items.iter().enumerate() {
                            let expected = if j == i { json!("x") } else { before[j].clone() };
                            prop_assert_eq!(item, &expected);
                        }
                    }
                    None => {
                        prop_assert!(prev.is_none());
                        prop_assert_eq!(&items, &before);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_absent_is_fixed_point(segments in proptest::collection::vec(".{0,4}", 0..8)) {
        let node = segments
            .iter()
            .fold(Traverser::<Value>::ABSENT, |node, segment| node.dereference(segment));
        prop_assert!(node.is_absent());
    }

    #[test]
    fn prop_set_then_get_roundtrips_existing_leaf(idx in 0usize..3, key in "[a-z]{1,4}") {
        let mut root = json!({"variables": {"list": [null, null, null], "map": {}}});
        root["variables"]["map"][key.as_str()] = Value::Null;

        let list_path = PathExpression::from(format!("variables.list.{idx}").as_str());
        let map_path = PathExpression::from(format!("variables.map.{key}").as_str());

        prop_assert!(Traverser::over(&mut root).set_path(&list_path, json!(idx)).is_some());
        prop_assert!(Traverser::over(&mut root).set_path(&map_path, json!(key.clone())).is_some());

        prop_assert_eq!(Reader::over(&root).get_path(&list_path), Some(&json!(idx)));
        prop_assert_eq!(Reader::over(&root).get_path(&map_path), Some(&json!(key)));
    }

    #[test]
    fn prop_join_is_key_intersection(
        left in proptest::collection::btree_map(0u8..20, any::<i32>(), 0..10),
        right in proptest::collection::btree_map(0u8..20, any::<i32>(), 0..10),
    ) {
        let joined: BTreeMap<u8, (i32, i32)> = join(&left, &right)
            .map(|e| (*e.key, (*e.left, *e.right)))
            .collect();

        for (k, (l, r)) in &joined {
            prop_assert_eq!(left.get(k), Some(l));
            prop_assert_eq!(right.get(k), Some(r));
        }
        let expected = left.keys().filter(|k| right.contains_key(*k)).count();
        prop_assert_eq!(joined.len(), expected);
    }
}

#[test]
fn signed_index_replaces_only_its_item() {
    let mut items = vec![json!(0), json!(1), json!(2)];
    let prev = Traverser::sequence(&mut items).set("+1", json!("x"));
    assert_eq!(prev, Some(json!(1)));
    assert_eq!(items, vec![json!(0), json!("x"), json!(2)]);
}

#[test]
fn sequence_of_two_ignores_bad_indices() {
    let mut items = vec![json!("list-item-1"), Value::Null];
    for segment in ["-2", "11", "abc"] {
        assert!(Traverser::sequence(&mut items).set(segment, json!("x")).is_none());
    }
    assert_eq!(items, vec![json!("list-item-1"), Value::Null]);
}
