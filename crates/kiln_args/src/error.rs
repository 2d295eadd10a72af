//! Error types for argument assembly.

use std::path::PathBuf;

use kiln_entry::EntryError;

/// Errors that can occur while assembling compiler arguments.
#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    /// An argument string has malformed quoting.
    #[error("unable to parse arguments from {origin}: {reason}")]
    Tokenize {
        /// Where the text came from.
        origin: String,
        /// Description of the quoting problem.
        reason: String,
    },

    /// The argument file could not be read.
    #[error("unable to read arguments from {path}: {source}")]
    ReadFile {
        /// The argument file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The entry point could not be determined.
    #[error("unable to append entry point arguments: {0}")]
    Entry(#[from] EntryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_display() {
        let err = ArgsError::Tokenize {
            origin: "$BP_NATIVE_IMAGE_BUILD_ARGUMENTS".to_string(),
            reason: "missing closing quote".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unable to parse arguments from $BP_NATIVE_IMAGE_BUILD_ARGUMENTS: missing closing quote"
        );
    }

    #[test]
    fn read_file_display() {
        let err = ArgsError::ReadFile {
            path: PathBuf::from("/tmp/args.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/tmp/args.txt"));
    }

    #[test]
    fn entry_display() {
        let err = ArgsError::from(EntryError::NoStartOrMainClass);
        assert!(err.to_string().contains("Start-Class or Main-Class"));
    }
}
