//! Reuse-or-rebuild decision for a cached layer.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::CacheError;
use crate::key::CacheKey;
use crate::layer::{Layer, LayerFlags};
use crate::metadata::LayerMetadata;

/// Which branch a contribution took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Contribution {
    /// The stored key matched and the previous contents were kept.
    Reused,
    /// The layer was reset and rebuilt.
    Rebuilt,
}

/// Contributes a layer whose contents are a function of a [`CacheKey`].
#[derive(Debug, Clone)]
pub struct LayerContributor {
    key: CacheKey,
    flags: LayerFlags,
    outputs: Vec<String>,
}

impl LayerContributor {
    /// Creates a contributor for `key` with the given layer flags.
    pub fn new(key: CacheKey, flags: LayerFlags) -> Self {
        Self {
            key,
            flags,
            outputs: Vec::new(),
        }
    }

    /// Requires `name` to be a file in the layer for its contents to be reused.
    #[must_use]
    pub fn with_output(mut self, name: impl Into<String>) -> Self {
        self.outputs.push(name.into());
        self
    }

    /// The key this contributor builds against.
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Returns `true` if `layer` already holds contents built from this key.
    pub fn is_cached(&self, layer: &Layer) -> bool {
        let Some(stored) = LayerMetadata::load(layer.metadata_path()) else {
            debug!("no previous metadata for layer {}", layer.name());
            return false;
        };
        if stored.metadata != self.key {
            debug!("cache key changed for layer {}", layer.name());
            return false;
        }
        if !layer.exists() {
            debug!("contents of layer {} are missing", layer.name());
            return false;
        }
        if let Some(missing) = self
            .outputs
            .iter()
            .find(|name| !layer.path().join(name).is_file())
        {
            debug!("output {missing} of layer {} is missing", layer.name());
            return false;
        }
        true
    }

    /// Reuses `layer` on a key match, otherwise resets it and runs `build`.
    ///
    /// The new key is persisted only after `build` succeeds, so a failed build
    /// leaves no metadata behind and the next run rebuilds.
    pub fn contribute<F, E>(&self, layer: &Layer, build: F) -> Result<Contribution, E>
    where
        F: FnOnce(&Layer) -> Result<(), E>,
        E: From<CacheError>,
    {
        if self.is_cached(layer) {
            info!(
                "Reusing cached layer {} ({})",
                layer.path().display(),
                self.key.fingerprint()
            );
            return Ok(Contribution::Reused);
        }

        info!("Contributing to layer {}", layer.path().display());
        layer.reset()?;
        build(layer)?;

        LayerMetadata {
            flags: self.flags,
            metadata: self.key.clone(),
        }
        .save(layer.metadata_path())?;
        debug!("stored key {} for layer {}", self.key.fingerprint(), layer.name());

        Ok(Contribution::Rebuilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layers;
    use crate::listing::FileListing;

    fn key(arg: &str) -> CacheKey {
        CacheKey::new(FileListing::default(), vec![arg.to_string()], "none", b"v1")
    }

    fn write_binary(layer: &Layer) -> Result<(), CacheError> {
        std::fs::write(layer.path().join("app"), b"binary").map_err(|e| CacheError::Io {
            path: layer.path().join("app"),
            source: e,
        })
    }

    #[test]
    fn first_contribution_rebuilds() {
        let dir = tempfile::tempdir().unwrap();
        let layer = Layers::new(dir.path()).layer("native-image");
        let contributor = LayerContributor::new(key("a"), LayerFlags::cache());

        let result = contributor.contribute(&layer, write_binary).unwrap();
        assert_eq!(result, Contribution::Rebuilt);
        assert!(layer.path().join("app").exists());
        assert_eq!(
            LayerMetadata::load(layer.metadata_path()).unwrap().metadata,
            key("a")
        );
    }

    #[test]
    fn same_key_reuses_without_running() {
        let dir = tempfile::tempdir().unwrap();
        let layer = Layers::new(dir.path()).layer("native-image");
        let contributor = LayerContributor::new(key("a"), LayerFlags::cache());
        contributor.contribute(&layer, write_binary).unwrap();

        let mut ran = false;
        let result = contributor
            .contribute(&layer, |_| -> Result<(), CacheError> {
                ran = true;
                Ok(())
            })
            .unwrap();
        assert_eq!(result, Contribution::Reused);
        assert!(!ran);
        assert!(layer.path().join("app").exists());
    }

    #[test]
    fn changed_key_rebuilds() {
        let dir = tempfile::tempdir().unwrap();
        let layer = Layers::new(dir.path()).layer("native-image");
        LayerContributor::new(key("a"), LayerFlags::cache())
            .contribute(&layer, write_binary)
            .unwrap();

        let result = LayerContributor::new(key("b"), LayerFlags::cache())
            .contribute(&layer, |_| -> Result<(), CacheError> { Ok(()) })
            .unwrap();
        assert_eq!(result, Contribution::Rebuilt);
        assert!(!layer.path().join("app").exists());
    }

    #[test]
    fn missing_contents_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let layer = Layers::new(dir.path()).layer("native-image");
        let contributor = LayerContributor::new(key("a"), LayerFlags::cache());
        contributor.contribute(&layer, write_binary).unwrap();
        std::fs::remove_dir_all(layer.path()).unwrap();

        assert!(!contributor.is_cached(&layer));
        let result = contributor.contribute(&layer, write_binary).unwrap();
        assert_eq!(result, Contribution::Rebuilt);
    }

    #[test]
    fn missing_output_rebuilds() {
        let dir = tempfile::tempdir().unwrap();
        let layer = Layers::new(dir.path()).layer("native-image");
        let contributor =
            LayerContributor::new(key("a"), LayerFlags::cache()).with_output("app");
        contributor.contribute(&layer, write_binary).unwrap();
        assert!(contributor.is_cached(&layer));

        std::fs::remove_file(layer.path().join("app")).unwrap();
        assert!(layer.exists());
        assert!(!contributor.is_cached(&layer));

        let result = contributor.contribute(&layer, write_binary).unwrap();
        assert_eq!(result, Contribution::Rebuilt);
        assert!(layer.path().join("app").is_file());
    }

    #[test]
    fn failed_build_stores_no_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let layer = Layers::new(dir.path()).layer("native-image");
        let contributor = LayerContributor::new(key("a"), LayerFlags::cache());

        let result = contributor.contribute(&layer, |l| {
            Err(CacheError::Io {
                path: l.path().to_path_buf(),
                source: std::io::Error::other("compile failed"),
            })
        });
        assert!(result.is_err());
        assert!(!layer.metadata_path().exists());
        assert!(!contributor.is_cached(&layer));
    }
}
