//! Structural diff: the minimal part of a new value that differs from an old one.
//!
//! The patch keeps the shape of the updated value at every level it
//! recurses into. Where the two sides have different shapes, or where the
//! original has nothing at a position, the updated value is copied
//! wholesale. Unchanged subtrees are dropped, and a container with nothing
//! left in it collapses to `None`.

use serde_json::{Map, Value};

/// Compute the patch that moves `original` to `updated`.
///
/// Returns `None` when there is no difference. `original = None` means
/// "nothing existed before".
///
/// - **Lists** are compared index by index against a list original.
///   Elements past the original's end are new and copied verbatim; the
///   others are diffed recursively. Only differing elements are kept, in
///   encounter order, so the patch does not preserve indices. A list
///   against anything but a list is returned whole.
/// - **Records** keep keys the original lacks verbatim and recurse into the
///   keys both sides share. Keys only the original has are ignored.
/// - **Scalars** are returned when they differ from the original.
pub fn diff(updated: &Value, original: Option<&Value>) -> Option<Value> {
    match updated {
        Value::Array(items) => diff_list(items, original),
        Value::Object(fields) => diff_record(fields, original),
        scalar => match original {
            Some(prev) if scalar_eq(scalar, prev) => None,
            _ => Some(scalar.clone()),
        },
    }
}

/// Scalar equality by value. Numbers compare numerically, so `1`, `1.0`
/// and `-0.0`/`0` are the same number regardless of representation.
fn scalar_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        _ => a == b,
    }
}

/// [`diff`] with an original that is known to exist.
pub fn diff_values(updated: &Value, original: &Value) -> Option<Value> {
    diff(updated, Some(original))
}

fn diff_list(items: &[Value], original: Option<&Value>) -> Option<Value> {
    let Some(Value::Array(before)) = original else {
        return Some(Value::Array(items.to_vec()));
    };

    let changed: Vec<Value> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match before.get(index) {
            Some(prev) => diff(item, Some(prev)),
            None => Some(item.clone()),
        })
        .collect();

    (!changed.is_empty()).then_some(Value::Array(changed))
}

fn diff_record(fields: &Map<String, Value>, original: Option<&Value>) -> Option<Value> {
    let before = original.and_then(Value::as_object);

    let mut changed = Map::new();
    for (key, value) in fields {
        match before.and_then(|b| b.get(key)) {
            Some(prev) => {
                if let Some(patch) = diff(value, Some(prev)) {
                    changed.insert(key.clone(), patch);
                }
            }
            None => {
                changed.insert(key.clone(), value.clone());
            }
        }
    }

    (!changed.is_empty()).then_some(Value::Object(changed))
}

/// Size summary of a patch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchStats {
    /// Scalars and empty containers, i.e. what [`flatten`](crate::flatten) yields.
    pub leaves: usize,
    /// Container nesting depth. A scalar is 0, `[]` and `{"a": 1}` are 1.
    pub depth: usize,
}

/// Count leaves and measure nesting depth of a value.
pub fn patch_stats(patch: &Value) -> PatchStats {
    let children: Vec<&Value> = match patch {
        Value::Array(items) => items.iter().collect(),
        Value::Object(fields) => fields.values().collect(),
        _ => return PatchStats { leaves: 1, depth: 0 },
    };
    if children.is_empty() {
        return PatchStats { leaves: 1, depth: 1 };
    }

    children.into_iter().map(patch_stats).fold(PatchStats::default(), |acc, child| PatchStats {
        leaves: acc.leaves + child.leaves,
        depth: acc.depth.max(child.depth + 1),
    })
}
