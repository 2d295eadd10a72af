//! Persisted layer metadata.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::key::CacheKey;
use crate::layer::LayerFlags;

/// What was stored after the last successful contribution to a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMetadata {
    /// Layer availability flags.
    #[serde(flatten)]
    pub flags: LayerFlags,
    /// The key the layer contents were built from.
    pub metadata: CacheKey,
}

impl LayerMetadata {
    /// Loads metadata from `path`, returning `None` if the file doesn't exist
    /// or can't be parsed.
    ///
    /// This is fail-safe: any error results in `None` (cache miss).
    pub fn load(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Writes the metadata to `path`, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
