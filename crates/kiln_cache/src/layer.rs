//! Layer directories and their metadata files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Extension of the metadata file stored next to each layer directory.
const METADATA_EXT: &str = "json";

/// How a layer is made available to later phases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerFlags {
    /// Visible to subsequent build steps.
    pub build: bool,
    /// Kept between builds.
    pub cache: bool,
    /// Included in the launch image.
    pub launch: bool,
}

impl LayerFlags {
    /// A layer kept between builds only.
    pub fn cache() -> Self {
        Self {
            cache: true,
            ..Self::default()
        }
    }
}

/// The directory holding all layers of a build.
#[derive(Debug, Clone)]
pub struct Layers {
    root: PathBuf,
}

impl Layers {
    /// Creates a handle for the layers directory at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the layer called `name`. Nothing is created on disk.
    pub fn layer(&self, name: &str) -> Layer {
        Layer {
            name: name.to_string(),
            path: self.root.join(name),
            metadata_path: self.root.join(format!("{name}.{METADATA_EXT}")),
        }
    }

    /// Path of the layers directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A single named layer: a directory plus a sibling metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
    path: PathBuf,
    metadata_path: PathBuf,
}

impl Layer {
    /// The layer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The layer directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The metadata file.
    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    /// Returns `true` if the layer directory exists.
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Deletes the metadata and any previous contents, then recreates an
    /// empty layer directory.
    pub fn reset(&self) -> Result<(), CacheError> {
        remove_if_present(&self.metadata_path, false)?;
        remove_if_present(&self.path, true)?;
        std::fs::create_dir_all(&self.path).map_err(|e| CacheError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

fn remove_if_present(path: &Path, dir: bool) -> Result<(), CacheError> {
    let result = if dir {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
