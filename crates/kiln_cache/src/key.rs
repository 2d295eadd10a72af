//! The composite key that gates a layer rebuild.

use kiln_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::listing::FileListing;

/// Everything a compiled layer depends on.
///
/// Two keys are equal only if the application tree, the argument vector, the
/// compression method and the compiler version output all match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CacheKey {
    /// Listing of the application directory.
    pub files: FileListing,
    /// Final compiler argument vector.
    pub arguments: Vec<String>,
    /// Compression method identifier.
    pub compression: String,
    /// Digest of the compiler's version output.
    pub version_hash: ContentHash,
}

impl CacheKey {
    /// Creates a key, hashing the raw compiler version output.
    pub fn new(
        files: FileListing,
        arguments: Vec<String>,
        compression: impl Into<String>,
        version_output: &[u8],
    ) -> Self {
        Self {
            files,
            arguments,
            compression: compression.into(),
            version_hash: ContentHash::from_bytes(version_output),
        }
    }

    /// A single digest over every component, for logging.
    pub fn fingerprint(&self) -> ContentHash {
        let arguments = ContentHash::from_bytes(self.arguments.join("\0").as_bytes());
        ContentHash::combine(&[
            self.files.digest(),
            arguments,
            ContentHash::from_bytes(self.compression.as_bytes()),
            self.version_hash,
        ])
    }
}
