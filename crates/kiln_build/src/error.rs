//! Error types for the build.

use std::path::PathBuf;

use kiln_args::ArgsError;
use kiln_cache::CacheError;
use kiln_config::{CompressionMethod, ConfigError};
use kiln_entry::EntryError;

use crate::exec::ExecError;

/// Errors that abort a build. Each variant names the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Configuration could not be resolved.
    #[error("unable to resolve configuration: {0}")]
    Config(#[from] ConfigError),

    /// The manifest could not be read.
    #[error("unable to read manifest in {path}: {source}")]
    Manifest {
        /// The application root.
        path: PathBuf,
        /// The underlying error.
        source: EntryError,
    },

    /// No entry point could be resolved.
    #[error("unable to find entry point: {0}")]
    Entry(#[from] EntryError),

    /// The compiler arguments could not be assembled.
    #[error("unable to process arguments: {0}")]
    Arguments(#[from] ArgsError),

    /// The application directory could not be listed.
    #[error("unable to create file listing for {path}: {source}")]
    Listing {
        /// The application root.
        path: PathBuf,
        /// The underlying error.
        source: CacheError,
    },

    /// The compiler version query failed.
    #[error("error running version: {0}")]
    Version(#[source] ExecError),

    /// The compiler failed.
    #[error("error running build: {0}")]
    Compile(#[source] ExecError),

    /// The compiler succeeded without producing the executable.
    #[error("native-image did not produce {path}")]
    MissingOutput {
        /// The expected executable.
        path: PathBuf,
    },

    /// The compressor failed.
    #[error("error compressing with {method}: {source}")]
    Compress {
        /// The compression method in use.
        method: CompressionMethod,
        /// The underlying error.
        source: ExecError,
    },

    /// The compressor's backup file could not be removed.
    #[error("error removing {path}: {source}")]
    RemoveBackup {
        /// The backup file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The compiled output could not be moved into the application directory.
    #[error("unable to relocate {path}: {source}")]
    Relocate {
        /// The file or directory being removed or copied.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The layer could not be prepared or its metadata stored.
    #[error("unable to contribute native-image layer: {0}")]
    Cache(#[from] CacheError),
}
