//! Error types for glob resolution.

use std::path::PathBuf;

/// Errors that can occur while resolving a glob against the filesystem.
#[derive(Debug, thiserror::Error)]
pub enum GlobError {
    /// The expression is not a valid glob pattern.
    #[error("invalid glob pattern '{expression}': {reason}")]
    Pattern {
        /// The offending expression.
        expression: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// An entry matched by the pattern could not be inspected.
    #[error("glob I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A recursive traversal failed.
    #[error("failed to walk directory {root}: {reason}")]
    Walk {
        /// The directory the traversal started from.
        root: PathBuf,
        /// Description of the failure.
        reason: String,
    },
}
