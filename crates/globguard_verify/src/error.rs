//! Error types for verification artifacts.

use std::path::PathBuf;

/// Errors that can occur while writing or reading verification artifacts.
///
/// Reading the manifest is fail-safe and never surfaces these; they are
/// returned by the writers so the driver can decide whether to abort.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// An I/O error occurred while creating a directory or writing a file.
    #[error("verification I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The glob manifest could not be parsed.
    #[error("failed to parse glob manifest: {reason}")]
    ManifestParse {
        /// Description of the parse failure.
        reason: String,
    },

    /// The glob manifest could not be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
