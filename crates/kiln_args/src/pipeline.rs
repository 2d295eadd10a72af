//! Ordered application of every argument source.

use std::path::{Path, PathBuf};

use kiln_config::BuildConfig;
use kiln_entry::EntryPoint;
use tracing::debug;

use crate::error::ArgsError;
use crate::source::{
    ArgumentSource, BaselineArguments, EntryPointArguments, UserArguments, UserFileArguments,
};

/// Builds the compiler command line from configuration and an entry point.
///
/// Order: baseline, argument file, inline arguments, entry point. The file
/// stage runs only when a file is configured.
#[derive(Debug, Clone, Default)]
pub struct ArgumentPipeline {
    /// Identifier of the target stack.
    pub stack_id: String,
    /// Optional argument file.
    pub arguments_file: Option<PathBuf>,
    /// Optional inline arguments.
    pub arguments: Option<String>,
}

impl ArgumentPipeline {
    /// Creates a pipeline from resolved build configuration.
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            stack_id: config.stack_id.clone(),
            arguments_file: config.arguments_file.clone(),
            arguments: config.arguments.clone(),
        }
    }

    /// Runs the stages that do not depend on the entry point.
    pub fn user_arguments(&self) -> Result<Vec<String>, ArgsError> {
        let mut sources: Vec<Box<dyn ArgumentSource>> = vec![Box::new(BaselineArguments {
            stack_id: self.stack_id.clone(),
        })];
        if let Some(path) = &self.arguments_file {
            sources.push(Box::new(UserFileArguments { path: path.clone() }));
        }
        if let Some(arguments) = &self.arguments {
            sources.push(Box::new(UserArguments {
                arguments: arguments.clone(),
            }));
        }

        let mut args = Vec::new();
        for source in &sources {
            args = source.configure(args)?;
        }
        Ok(args)
    }

    /// Runs every stage and returns the final command line.
    pub fn assemble(
        &self,
        entry: &dyn EntryPoint,
        layer_path: &Path,
    ) -> Result<Vec<String>, ArgsError> {
        let args = self.user_arguments()?;
        let args = EntryPointArguments { entry, layer_path }.configure(args)?;
        debug!(count = args.len(), "assembled native-image arguments");
        Ok(args)
    }
}
