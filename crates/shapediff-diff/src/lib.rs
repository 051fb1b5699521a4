//! Structural diff engine for shapediff.
//!
//! Computes the minimal substructure of an updated value that differs from
//! an original one, and provides the tooling to put such patches to work:
//! flattening them into path/value leaves, writing leaves onto a target,
//! pruning stale keys, and reconciling a changed set of defaults into an
//! edited model.
//!
//! # Key Functions
//!
//! - [`diff`] / [`diff_values`] -- Shape-preserving minimal patch
//! - [`flatten`] / [`flatten_records`] / [`flatten_to_map`] -- Patch to path leaves
//! - [`get_path`] / [`set_path`] / [`apply_patch`] -- Path-addressed reads and writes
//! - [`prune_missing`] -- Drop record keys absent from a reference value
//! - [`reconcile`] -- Merge new defaults into an edited model ([`SyncConfig`], [`SyncReport`])

pub mod apply;
pub mod config;
pub mod error;
pub mod flatten;
pub mod prune;
pub mod structural;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use apply::{apply_patch, get_path, lookup, set_path};
pub use config::SyncConfig;
pub use error::{DiffError, DiffResult};
pub use flatten::{flatten, flatten_records, flatten_to_map};
pub use prune::prune_missing;
pub use structural::{diff, diff_values, patch_stats, PatchStats};
pub use sync::{reconcile, SyncReport};
