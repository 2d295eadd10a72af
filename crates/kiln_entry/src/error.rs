//! Error types for entry point resolution.

use std::path::PathBuf;

/// Errors that can occur while resolving an application's entry point.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The manifest names neither a `Start-Class` nor a `Main-Class`.
    #[error("unable to read Start-Class or Main-Class from MANIFEST.MF")]
    NoStartOrMainClass,

    /// The jar glob matched zero or several files.
    #[error("unable to find single JAR in {pattern}, candidates: {}", format_candidates(.candidates))]
    JarNotFound {
        /// The glob as configured.
        pattern: String,
        /// Every match, sorted.
        candidates: Vec<PathBuf>,
    },

    /// The jar glob is not a valid pattern.
    #[error("unable to find JAR with {pattern}: {reason}")]
    InvalidPattern {
        /// The glob as configured.
        pattern: String,
        /// Description of the pattern problem.
        reason: String,
    },

    /// The resolved file does not end in `.jar`.
    #[error("file {file} does not have a .jar extension")]
    NotAJar {
        /// The offending file name.
        file: String,
    },

    /// An I/O error occurred while reading the manifest or matching the glob.
    #[error("entry resolution I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Renders candidates as `[a b c]`.
fn format_candidates(candidates: &[PathBuf]) -> String {
    let joined: Vec<String> = candidates.iter().map(|c| c.display().to_string()).collect();
    format!("[{}]", joined.join(" "))
}
