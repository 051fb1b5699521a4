//! Path-addressed reads and writes on values.

use serde_json::{Map, Value};
use shapediff_types::{PathSegment, ValuePath};
use tracing::debug;

use crate::error::DiffResult;
use crate::flatten::flatten;

/// Look up the value at `path`, if every segment resolves.
pub fn get_path<'a>(root: &'a Value, path: &ValuePath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(root, |node, segment| match (node, segment) {
            (Value::Object(fields), PathSegment::Key(key)) => fields.get(key),
            (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
            _ => None,
        })
}

/// [`get_path`] with a dotted path string.
pub fn lookup<'a>(root: &'a Value, path: &str) -> DiffResult<Option<&'a Value>> {
    let path = ValuePath::parse(path)?;
    Ok(get_path(root, &path))
}

/// Write `value` at `path`, creating containers along the way.
///
/// A node that cannot hold the next segment (a scalar, `null`, or the
/// other kind of container) is replaced by an empty record for a key
/// segment or an empty list for an index segment. Lists are padded with
/// `null` up to the addressed index. The root path replaces `root`.
pub fn set_path(root: &mut Value, path: &ValuePath, value: Value) {
    let mut node = root;
    for segment in path.segments() {
        node = match segment {
            PathSegment::Key(key) => ensure_record(node)
                .entry(key.clone())
                .or_insert(Value::Null),
            PathSegment::Index(index) => {
                let items = ensure_list(node);
                if items.len() <= *index {
                    items.resize(*index + 1, Value::Null);
                }
                &mut items[*index]
            }
        };
    }
    *node = value;
}

fn ensure_record(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(fields) => fields,
        _ => unreachable!("node was just made a record"),
    }
}

fn ensure_list(node: &mut Value) -> &mut Vec<Value> {
    if !node.is_array() {
        *node = Value::Array(Vec::new());
    }
    match node {
        Value::Array(items) => items,
        _ => unreachable!("node was just made a list"),
    }
}

/// Write every leaf of `patch` onto `target`. Returns the number of leaves
/// written.
///
/// List patches produced by [`diff`](crate::diff) are compacted, so their
/// elements land by position in the patch, not by position in the value
/// they were computed from. Use [`reconcile`](crate::reconcile) to bring a
/// model in line with a full value.
pub fn apply_patch(target: &mut Value, patch: &Value) -> usize {
    let leaves = flatten(patch);
    let written = leaves.len();
    for (path, leaf) in leaves {
        set_path(target, &path, leaf);
    }
    debug!(written, "patch applied");
    written
}
