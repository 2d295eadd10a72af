//! The build entry point.

use std::collections::BTreeMap;
use std::path::PathBuf;

use kiln_cache::{Contribution, Layers};
use kiln_config::{keys, BuildConfig, ConfigResolver, Descriptor};
use kiln_entry::Manifest;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::BuildError;
use crate::exec::Executor;
use crate::native::{NativeImage, LAYER_NAME};

/// Everything the surrounding lifecycle hands to a build.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The application directory.
    pub application: PathBuf,
    /// The directory holding layers.
    pub layers: PathBuf,
    /// Identifier of the target stack.
    pub stack_id: String,
    /// Environment snapshot used for configuration.
    pub env: BTreeMap<String, String>,
    /// Configuration descriptor supplying defaults.
    pub descriptor: Descriptor,
}

/// A launch process reported by the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    /// Process type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Executable path.
    pub command: PathBuf,
    /// Whether the command runs without a shell.
    pub direct: bool,
    /// Whether this is the default process.
    pub default: bool,
}

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildResult {
    /// Launch processes.
    pub processes: Vec<Process>,
    /// Whether the compile ran or the cached layer was reused.
    pub contribution: Contribution,
    /// The compiler argument vector.
    pub arguments: Vec<String>,
}

/// Compiles the application described by `context` and reports its processes.
pub fn build(context: &BuildContext, executor: &dyn Executor) -> Result<BuildResult, BuildError> {
    info!("Building native image for {}", context.application.display());

    let manifest = Manifest::load(&context.application).map_err(|source| BuildError::Manifest {
        path: context.application.clone(),
        source,
    })?;

    let resolver = ConfigResolver::new(&context.descriptor, context.env.clone());
    if resolver.is_set(keys::DEPRECATED_NATIVE_IMAGE) {
        warn!(
            "${} has been deprecated. Please use ${} instead.",
            keys::DEPRECATED_NATIVE_IMAGE,
            keys::NATIVE_IMAGE
        );
    }
    let config = BuildConfig::resolve(&resolver, &context.application, &context.stack_id)?;

    let layer = Layers::new(&context.layers).layer(LAYER_NAME);
    let outcome = NativeImage::new(&context.application, config, manifest, executor)
        .contribute(&layer)?;

    let command = context.application.join(&outcome.name);
    let processes = [("native-image", false), ("task", false), ("web", true)]
        .into_iter()
        .map(|(kind, default)| Process {
            kind: kind.to_string(),
            command: command.clone(),
            direct: true,
            default,
        })
        .collect();

    Ok(BuildResult {
        processes,
        contribution: outcome.contribution,
        arguments: outcome.arguments,
    })
}
