//! Flatten nested values into `(path, leaf)` pairs.
//!
//! Leaves are scalars and empty containers. Order is depth-first and
//! follows the value's own key and element order.

use serde_json::{Map, Value};
use shapediff_types::ValuePath;

/// Flatten `patch`, descending into records and lists.
pub fn flatten(patch: &Value) -> Vec<(ValuePath, Value)> {
    let mut leaves = Vec::new();
    walk(patch, &mut ValuePath::root(), true, &mut leaves);
    leaves
}

/// Flatten `patch`, descending into records only. Lists are leaves.
pub fn flatten_records(patch: &Value) -> Vec<(ValuePath, Value)> {
    let mut leaves = Vec::new();
    walk(patch, &mut ValuePath::root(), false, &mut leaves);
    leaves
}

/// [`flatten`] keyed by the dotted text form of each path.
pub fn flatten_to_map(patch: &Value) -> Map<String, Value> {
    flatten(patch)
        .into_iter()
        .map(|(path, leaf)| (path.to_string(), leaf))
        .collect()
}

fn walk(
    value: &Value,
    path: &mut ValuePath,
    descend_lists: bool,
    leaves: &mut Vec<(ValuePath, Value)>,
) {
    match value {
        Value::Object(fields) if !fields.is_empty() => {
            for (key, child) in fields {
                path.push(key.as_str());
                walk(child, path, descend_lists, leaves);
                path.pop();
            }
        }
        Value::Array(items) if descend_lists && !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                path.push(index);
                walk(child, path, descend_lists, leaves);
                path.pop();
            }
        }
        leaf => leaves.push((path.clone(), leaf.clone())),
    }
}
