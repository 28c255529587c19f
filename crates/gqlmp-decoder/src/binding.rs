//! Upload bindings
//!
//! A [`Binding`] pairs one target path from the `map` part with the file
//! part its key refers to. [`resolve_bindings`] builds the eligible set from
//! the decoded map and the submitted files; [`Binding::apply`] writes one
//! into the operations tree.

use crate::config::CollisionPolicy;
use crate::upload::Upload;
use crate::value::{Object, Value};
use gqlmp_graph::{join, PathExpression, Traverser};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

/// Decoded `map` part: file key to the paths that file is bound to
pub type FileMap = IndexMap<String, IndexSet<PathExpression>>;

/// One upload bound to one target path
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    target_path: PathExpression,
    source: Upload,
}

impl Binding {
    /// Create a binding
    #[must_use]
    pub fn new(target_path: PathExpression, source: Upload) -> Self {
        Self {
            target_path,
            source,
        }
    }

    /// Where the upload goes
    #[must_use]
    pub fn target_path(&self) -> &PathExpression {
        &self.target_path
    }

    /// The bound upload
    #[must_use]
    pub fn source(&self) -> &Upload {
        &self.source
    }

    /// Whether the target path is valid and starts with `root`
    #[must_use]
    pub fn is_rooted_at(&self, root: &str) -> bool {
        self.target_path.is_rooted_at(root)
    }

    /// Write the upload into `operations` at the target path
    ///
    /// Returns `false` when the path does not resolve; the tree is then
    /// unchanged.
    pub fn apply(self, operations: &mut Object) -> bool {
        let Self {
            target_path,
            source,
        } = self;
        let file = source.name().to_owned();
        let applied = Traverser::<Value>::keyed(operations)
            .set_path(&target_path, Value::Upload(source))
            .is_some();
        if applied {
            tracing::trace!(path = %target_path, file = %file, "bound upload");
        } else {
            tracing::debug!(path = %target_path, file = %file, "upload target did not resolve");
        }
        applied
    }

    /// Split into `(target_path, source)`
    #[must_use]
    pub fn into_parts(self) -> (PathExpression, Upload) {
        (self.target_path, self.source)
    }
}

/// Build the bindings to apply, in map document order
///
/// - only keys present in both `file_map` and `files` produce candidates
/// - candidates whose path is not rooted at `root` are dropped
/// - candidates sharing a target path are merged by `policy`, keeping the
///   position of the first one
#[must_use]
pub fn resolve_bindings(
    file_map: &FileMap,
    files: &IndexMap<String, Upload>,
    root: &str,
    policy: CollisionPolicy,
) -> Vec<Binding> {
    let combine = policy.combiner::<Binding>();
    let mut resolved: IndexMap<PathExpression, Binding> = IndexMap::new();

    let candidates = join(file_map, files)
        .flat_map(|entry| entry.flat_map_left(IndexSet::iter))
        .map(|entry| Binding::new(entry.left.clone(), entry.right.clone()));

    for binding in candidates {
        if !binding.is_rooted_at(root) {
            tracing::debug!(path = %binding.target_path, root, "dropped upload target outside root");
            continue;
        }
        match resolved.entry(binding.target_path.clone()) {
            Entry::Occupied(mut slot) => {
                tracing::debug!(path = %binding.target_path, ?policy, "multiple uploads target one path");
                let merged = combine(slot.get().clone(), binding);
                slot.insert(merged);
            }
            Entry::Vacant(slot) => {
                slot.insert(binding);
            }
        }
    }

    for key in file_map.keys().filter(|key| !files.contains_key(key.as_str())) {
        tracing::debug!(file = %key, "map entry has no matching file part");
    }

    resolved.into_values().collect()
}
