use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Configuration for [`reconcile`](crate::reconcile).
///
/// Every field has a default, so a TOML document only needs the keys it
/// wants to change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Remove model keys that the defaults no longer have.
    pub prune_missing: bool,
    /// Refuse patches nested deeper than this.
    pub max_depth: Option<usize>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            prune_missing: true,
            max_depth: None,
        }
    }
}

impl SyncConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> DiffResult<Self> {
        toml::from_str(s).map_err(|e| DiffError::Config(e.to_string()))
    }

    pub fn with_pruning(mut self, prune_missing: bool) -> Self {
        self.prune_missing = prune_missing;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
