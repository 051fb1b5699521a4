use serde_json::Value;

/// Remove record keys of `target` that `reference` does not have.
///
/// Where both sides hold a record under the same key the pruning recurses,
/// and a nested record emptied by that recursion is removed as well.
/// Records that were already empty are kept. Lists and scalars are never
/// looked into. Returns the number of keys removed at all depths.
pub fn prune_missing(target: &mut Value, reference: &Value) -> usize {
    let Value::Object(fields) = target else {
        return 0;
    };
    let reference = reference.as_object();

    let mut removed = 0;
    fields.retain(|key, value| {
        let Some(expected) = reference.and_then(|r| r.get(key)) else {
            removed += 1;
            return false;
        };
        if !(value.is_object() && expected.is_object()) {
            return true;
        }
        let nested = prune_missing(value, expected);
        removed += nested;
        let emptied = nested > 0 && value.as_object().is_some_and(|f| f.is_empty());
        if emptied {
            removed += 1;
        }
        !emptied
    });
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn removes_top_level_keys() {
        let mut target = json!({"a": 1, "b": 2, "c": 3});
        let removed = prune_missing(&mut target, &json!({"a": 0, "c": null}));
        assert_eq!(removed, 1);
        assert_eq!(target, json!({"a": 1, "c": 3}));
    }

    #[test]
    fn recurses_into_shared_records() {
        let mut target = json!({"a": {"x": 1, "y": 2}, "b": 1});
        let removed = prune_missing(&mut target, &json!({"a": {"x": 5}, "b": 1}));
        assert_eq!(removed, 1);
        assert_eq!(target, json!({"a": {"x": 1}, "b": 1}));
    }

    #[test]
    fn drops_records_it_emptied() {
        let mut target = json!({"a": {"gone": 1}, "keep": {}});
        let removed = prune_missing(&mut target, &json!({"a": {"other": 1}, "keep": {}}));
        assert_eq!(removed, 2);
        assert_eq!(target, json!({"keep": {}}));
    }

    #[test]
    fn non_record_reference_clears_everything() {
        let mut target = json!({"a": 1, "b": {"c": 2}});
        assert_eq!(prune_missing(&mut target, &json!([1, 2])), 2);
        assert_eq!(target, json!({}));

        let mut again = json!({"a": 1});
        assert_eq!(prune_missing(&mut again, &json!({})), 1);
        assert_eq!(again, json!({}));
    }

    #[test]
    fn lists_and_scalars_are_left_alone() {
        let mut target = json!({"l": [{"x": 1}], "s": 1});
        let removed = prune_missing(&mut target, &json!({"l": [{"y": 1}], "s": {"t": 1}}));
        assert_eq!(removed, 0);
        assert_eq!(target, json!({"l": [{"x": 1}], "s": 1}));

        let mut list = json!([1, 2]);
        assert_eq!(prune_missing(&mut list, &json!({})), 0);
    }
}
