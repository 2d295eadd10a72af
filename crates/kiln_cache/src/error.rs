//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur during cache operations.
///
/// Reading stored metadata is fail-safe and never produces these; they come
/// from listing the application tree and from writing the layer.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while listing files or writing the layer.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Layer metadata could not be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
