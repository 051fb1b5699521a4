//! Default reconciliation: bring an edited model in line with new defaults.
//!
//! When the defaults behind a model change, only the parts that actually
//! differ are written, so untouched fields keep their identity and any
//! watcher on the model sees the smallest possible change.

use serde_json::{Map, Value};
use shapediff_types::Shape;
use tracing::debug;

use crate::apply::{get_path, set_path};
use crate::config::SyncConfig;
use crate::error::{DiffError, DiffResult};
use crate::flatten::flatten_records;
use crate::prune::prune_missing;
use crate::structural::{diff, patch_stats};

/// What a [`reconcile`] call changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Leaves written onto the model.
    pub written: usize,
    /// Keys removed from the model.
    pub pruned: usize,
}

impl SyncReport {
    /// Returns `true` if the model was not modified.
    pub fn is_noop(&self) -> bool {
        self.written == 0 && self.pruned == 0
    }
}

/// Reconcile `model` with `defaults`.
///
/// With defaults present, the patch `diff(defaults, model)` is written onto
/// the model. Records are written leaf by leaf; a list that differs at all
/// is replaced by the defaults' list at that path, since list patches do
/// not keep positions. The patch misses lists where the model only has an
/// extra tail or extra record keys inside elements, so every list the
/// defaults hold is compared afterwards and replaced when it still
/// differs. Keys the defaults lack are then pruned when
/// [`SyncConfig::prune_missing`] is set.
///
/// Without defaults, the model is pruned against an empty record, which
/// clears a record model entirely.
///
/// Fails with [`DiffError::DepthExceeded`] before touching the model if the
/// patch is deeper than [`SyncConfig::max_depth`].
pub fn reconcile(
    model: &mut Value,
    defaults: Option<&Value>,
    config: &SyncConfig,
) -> DiffResult<SyncReport> {
    let mut report = SyncReport::default();

    let Some(defaults) = defaults else {
        if config.prune_missing {
            report.pruned = prune_missing(model, &Value::Object(Map::new()));
        }
        debug!(pruned = report.pruned, "defaults cleared");
        return Ok(report);
    };

    if let Some(patch) = diff(defaults, Some(&*model)) {
        if let Some(limit) = config.max_depth {
            let depth = patch_stats(&patch).depth;
            if depth > limit {
                return Err(DiffError::DepthExceeded { depth, limit });
            }
        }

        for (path, leaf) in flatten_records(&patch) {
            let value = match leaf {
                Value::Array(_) => get_path(defaults, &path).cloned().unwrap_or(leaf),
                other => other,
            };
            set_path(model, &path, value);
            report.written += 1;
        }
    }

    report.written += replace_stale_lists(model, defaults);

    if config.prune_missing {
        report.pruned = prune_missing(model, defaults);
    }

    debug!(
        shape = %Shape::of(defaults),
        written = report.written,
        pruned = report.pruned,
        "defaults reconciled"
    );
    Ok(report)
}

/// Replace every list under the records of `defaults` that the model does
/// not hold verbatim. Returns the number of lists replaced.
fn replace_stale_lists(model: &mut Value, defaults: &Value) -> usize {
    match defaults {
        Value::Array(_) if model != defaults => {
            *model = defaults.clone();
            1
        }
        Value::Object(fields) => {
            let Value::Object(target) = model else {
                return 0;
            };
            fields
                .iter()
                .filter_map(|(key, expected)| {
                    target
                        .get_mut(key)
                        .map(|node| replace_stale_lists(node, expected))
                })
                .sum()
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{any_value, value_without_empty_records};
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn writes_only_changed_fields() {
        let mut model = json!({"name": "edited", "age": 3, "tags": ["a"]});
        let defaults = json!({"name": "edited", "age": 4, "tags": ["a"]});

        let report = reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert_eq!(report, SyncReport { written: 1, pruned: 0 });
        assert_eq!(model, defaults);
    }

    #[test]
    fn lists_are_replaced_whole() {
        let mut model = json!({"tags": ["a", "b", "c"]});
        let defaults = json!({"tags": ["a", "x", "c", "d"]});

        reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert_eq!(model, defaults);
    }

    #[test]
    fn shorter_default_list_replaces_model_list() {
        let mut model = json!({"tags": ["a", "b", "c"]});
        let defaults = json!({"tags": ["a"]});

        let report = reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert_eq!(report, SyncReport { written: 1, pruned: 0 });
        assert_eq!(model, defaults);
    }

    #[test]
    fn emptied_default_list_replaces_model_list() {
        let mut model = json!({"tags": ["a"], "rows": [[1, 2]]});
        let defaults = json!({"tags": [], "rows": [[1]]});

        reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert_eq!(model, defaults);
    }

    #[test]
    fn root_list_shrinks_to_defaults() {
        let mut model = json!([null]);
        let defaults = json!([]);

        let report = reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(model, defaults);
    }

    #[test]
    fn record_in_list_drops_extra_key() {
        let mut model = json!({"rows": [{"x": 1, "y": 2}]});
        let defaults = json!({"rows": [{"x": 1}]});

        let report = reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert_eq!(report, SyncReport { written: 1, pruned: 0 });
        assert_eq!(model, defaults);
    }

    #[test]
    fn patched_list_is_not_counted_twice() {
        // The patch already carries the full defaults list, so the follow-up
        // comparison finds nothing left to replace.
        let mut model = json!({"tags": ["a", "b"]});
        let defaults = json!({"tags": ["x", "b"]});

        let report = reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(model, defaults);
    }

    #[test]
    fn prunes_keys_dropped_from_defaults() {
        let mut model = json!({"a": 1, "stale": true, "nested": {"x": 1, "old": 2}});
        let defaults = json!({"a": 1, "nested": {"x": 1}});

        let report = reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert_eq!(report, SyncReport { written: 0, pruned: 2 });
        assert_eq!(model, defaults);
    }

    #[test]
    fn pruning_can_be_disabled() {
        let mut model = json!({"a": 1, "extra": 2});
        let defaults = json!({"a": 5});
        let config = SyncConfig::default().with_pruning(false);

        let report = reconcile(&mut model, Some(&defaults), &config).unwrap();
        assert_eq!(report, SyncReport { written: 1, pruned: 0 });
        assert_eq!(model, json!({"a": 5, "extra": 2}));
    }

    #[test]
    fn shape_changes_replace_model_nodes() {
        let mut model = json!({"a": [1, 2], "b": 7, "c": {"k": 1}});
        let defaults = json!({"a": {"x": 1}, "b": {"y": [2]}, "c": [3]});

        reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert_eq!(model, defaults);
    }

    #[test]
    fn scalar_root() {
        let mut model = json!({"a": 1});
        let report = reconcile(&mut model, Some(&json!(42)), &SyncConfig::default()).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(model, json!(42));
    }

    #[test]
    fn missing_defaults_clear_model() {
        let mut model = json!({"a": 1, "b": {"c": 2}});
        let report = reconcile(&mut model, None, &SyncConfig::default()).unwrap();
        assert_eq!(report.pruned, 2);
        assert_eq!(model, json!({}));

        let mut kept = json!({"a": 1});
        let config = SyncConfig::default().with_pruning(false);
        assert!(reconcile(&mut kept, None, &config).unwrap().is_noop());
        assert_eq!(kept, json!({"a": 1}));
    }

    #[test]
    fn unchanged_model_is_noop() {
        let mut model = json!({"a": {"b": [1, 2]}});
        let defaults = model.clone();
        let report = reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
        assert!(report.is_noop());
    }

    #[test]
    fn depth_limit_rejects_without_writing() {
        let mut model = json!({"a": {"b": {"c": 1}}});
        let before = model.clone();
        let defaults = json!({"a": {"b": {"c": 2}}});
        let config = SyncConfig::default().with_max_depth(2);

        let err = reconcile(&mut model, Some(&defaults), &config).unwrap_err();
        assert!(matches!(err, DiffError::DepthExceeded { depth: 3, limit: 2 }));
        assert_eq!(model, before);

        let config = SyncConfig::default().with_max_depth(3);
        reconcile(&mut model, Some(&defaults), &config).unwrap();
        assert_eq!(model, defaults);
    }

    proptest! {
        #[test]
        fn reconcile_converges_on_defaults(
            mut model in any_value(),
            defaults in value_without_empty_records(),
        ) {
            reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
            prop_assert_eq!(model, defaults);
        }

        #[test]
        fn second_reconcile_is_noop(
            mut model in any_value(),
            defaults in value_without_empty_records(),
        ) {
            reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
            let again = reconcile(&mut model, Some(&defaults), &SyncConfig::default()).unwrap();
            prop_assert!(again.is_noop());
        }
    }
}
