//! Error types for the diff crate.

use shapediff_types::TypeError;

/// Errors that can occur around diff operations.
///
/// [`diff`](crate::diff) itself is total; these come from path parsing,
/// configuration, and the limits enforced by [`reconcile`](crate::reconcile).
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A patch was deeper than the configured limit.
    #[error("patch depth {depth} exceeds limit {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    /// A path or shape could not be parsed.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
