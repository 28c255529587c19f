//! GQLMP Graph
//!
//! Dotted-path addressing and safe traversal over nested, generically typed
//! value trees (ordered sequences and keyed maps).
//!
//! # Core Concepts
//!
//! - [`PathExpression`]: `variables.files.0` split into segments and a leaf key
//! - [`GraphNode`]: classification of a value into sequence / keyed / scalar
//! - [`Traverser`]: `Sequence | Keyed | Absent` variants behind the shared
//!   [`SegmentAccess`] capability; `Absent` is an inert fixed point
//! - [`join`]: inner join of two keyed collections with [`JoinedEntry`] combinators
//! - [`FieldAccessor`]: shape-checked field lookup with lenient and strict modes
//!
//! # Example
//!
//! ```rust
//! use gqlmp_graph::{PathExpression, Traverser};
//! use serde_json::json;
//!
//! let mut ops = json!({"variables": {"user": {"avatar": null}}});
//! let path: PathExpression = "variables.user.avatar".into();
//!
//! let prev = Traverser::over(&mut ops).set_path(&path, json!("file-0"));
//! assert_eq!(prev, Some(json!(null)));
//! assert_eq!(ops["variables"]["user"]["avatar"], "file-0");
//! ```

#![warn(unreachable_pub)]

// Core modules
mod accessor;
mod join;
mod keyed;
mod node;
mod path;
mod traverse;

/// Binary combinators used to merge or fold candidates
pub mod combine;

// Re-exports
pub use accessor::{FieldAccessor, FieldShapeMismatch};
pub use join::{join, JoinedEntry};
pub use keyed::Keyed;
pub use node::{GraphNode, Node, NodeMut};
pub use path::PathExpression;
pub use traverse::{AbsentAccess, KeyedAccess, Reader, SegmentAccess, SequenceAccess, Traverser};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use indexmap::{IndexMap, IndexSet};
    use serde_json::{json, Value};

    #[test]
    fn join_expand_and_inject() {
        let mut ops = json!({"variables": {"files": [null, null], "foo": "bar"}});

        let file_map: IndexMap<String, IndexSet<PathExpression>> = serde_json::from_str(
            r#"{"0": ["variables.files.0"], "1": ["variables.files.1", "badVar"]}"#,
        )
        .unwrap();
        let sources: IndexMap<String, Value> = [
            ("0".to_string(), json!("upload-0")),
            ("1".to_string(), json!("upload-1")),
        ]
        .into_iter()
        .collect();

        let bindings: Vec<_> = join(&file_map, &sources)
            .flat_map(|entry| entry.flat_map_left(IndexSet::iter))
            .filter(|entry| entry.left.is_rooted_at("variables"))
            .collect();
        assert_eq!(bindings.len(), 2);

        for entry in bindings {
            Traverser::over(&mut ops).set_path(entry.left, entry.right.clone());
        }

        assert_eq!(
            ops,
            json!({"variables": {"files": ["upload-0", "upload-1"], "foo": "bar"}})
        );
    }
}
