//! The native-image layer: compile, compress and relocate.

use std::path::{Path, PathBuf};

use kiln_args::ArgumentPipeline;
use kiln_cache::{CacheKey, Contribution, FileListing, Layer, LayerContributor, LayerFlags};
use kiln_config::BuildConfig;
use kiln_entry::{EntryPoint, MainEntry, Manifest};
use tracing::info;

use crate::compress::compress;
use crate::error::BuildError;
use crate::exec::{Execution, Executor};
use crate::relocate::relocate;

/// Name of the cached layer holding compiler output.
pub const LAYER_NAME: &str = "native-image";

/// The compiler executable.
pub const COMPILER: &str = "native-image";

/// What a native-image contribution produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeImageOutcome {
    /// Whether the compile step ran.
    pub contribution: Contribution,
    /// Program name of the produced binary.
    pub name: String,
    /// The compiler argument vector.
    pub arguments: Vec<String>,
    /// Files copied into the application directory.
    pub relocated: Vec<PathBuf>,
}

/// Compiles an application into a native executable.
pub struct NativeImage<'a> {
    app_root: PathBuf,
    config: BuildConfig,
    manifest: Option<Manifest>,
    executor: &'a dyn Executor,
}

impl<'a> NativeImage<'a> {
    /// Creates a native-image build for the application at `app_root`.
    pub fn new(
        app_root: &Path,
        config: BuildConfig,
        manifest: Option<Manifest>,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            app_root: app_root.to_path_buf(),
            config,
            manifest,
            executor,
        }
    }

    /// Resolves the entry point from the manifest and configuration.
    pub fn entry(&self) -> Result<MainEntry, BuildError> {
        Ok(MainEntry::select(
            &self.app_root,
            self.manifest.clone(),
            self.config.jar_pattern.as_deref(),
            &self.config.default_jar_pattern,
            self.config.classpath.as_deref(),
        )?)
    }

    /// Builds `layer` unless it is cached, then replaces the application
    /// contents with the compiled output.
    pub fn contribute(&self, layer: &Layer) -> Result<NativeImageOutcome, BuildError> {
        let files = FileListing::scan(&self.app_root).map_err(|source| BuildError::Listing {
            path: self.app_root.clone(),
            source,
        })?;

        let entry = self.entry()?;
        let arguments = ArgumentPipeline::from_config(&self.config).assemble(&entry, layer.path())?;
        let name = entry.name()?.to_string();

        let version = self
            .executor
            .execute(&Execution::new(COMPILER, ["--version"]).with_env(&self.config.compiler_env))
            .map_err(BuildError::Version)?;

        let key = CacheKey::new(
            files,
            arguments.clone(),
            self.config.compression.identifier(),
            &version,
        );
        let contribution = LayerContributor::new(key, LayerFlags::cache())
            .with_output(name.as_str())
            .contribute(layer, |layer| self.compile(layer, &arguments, &name))?;

        info!("Removing bytecode");
        let relocated = relocate(layer.path(), &self.app_root)?;

        Ok(NativeImageOutcome {
            contribution,
            name,
            arguments,
            relocated,
        })
    }

    fn compile(&self, layer: &Layer, arguments: &[String], name: &str) -> Result<(), BuildError> {
        let execution = Execution::new(COMPILER, arguments.iter().cloned())
            .with_dir(layer.path())
            .with_env(&self.config.compiler_env)
            .with_output_logged();
        info!("Executing {}", execution.display());
        self.executor
            .execute(&execution)
            .map_err(BuildError::Compile)?;

        let binary = layer.path().join(name);
        compress(self.executor, self.config.compression, &binary, layer.path())?;

        if !binary.is_file() {
            return Err(BuildError::MissingOutput { path: binary });
        }
        Ok(())
    }
}
