//! The argument sources that make up a compiler command line.

use std::path::{Path, PathBuf};

use kiln_config::keys::{BUILD_ARGUMENTS, TINY_STACK_ID};
use kiln_entry::EntryPoint;
use tracing::debug;

use crate::error::ArgsError;
use crate::merge::{override_merge, strip_jar};
use crate::tokenize::tokenize;

/// Fallback modes understood by the compiler. When none is given the
/// pipeline forces `--no-fallback`.
const FALLBACK_FLAGS: [&str; 3] = ["--auto-fallback", "--force-fallback", "--no-fallback"];

/// One stage of argument assembly.
///
/// Each source receives the vector produced so far and returns the vector to
/// hand to the next stage.
pub trait ArgumentSource {
    /// Applies this source to `input`.
    fn configure(&self, input: Vec<String>) -> Result<Vec<String>, ArgsError>;
}

/// Flags required by the target platform.
///
/// Ignores its input and starts a fresh vector.
#[derive(Debug, Clone)]
pub struct BaselineArguments {
    /// Identifier of the stack the image will run on.
    pub stack_id: String,
}

impl ArgumentSource for BaselineArguments {
    fn configure(&self, _input: Vec<String>) -> Result<Vec<String>, ArgsError> {
        let mut args = Vec::new();
        if self.stack_id == TINY_STACK_ID {
            args.push("-H:+StaticExecutableWithDynamicLibC".to_string());
        }
        Ok(args)
    }
}

/// Arguments read from a file, whitespace or newline separated.
#[derive(Debug, Clone)]
pub struct UserFileArguments {
    /// The argument file.
    pub path: PathBuf,
}

impl ArgumentSource for UserFileArguments {
    fn configure(&self, input: Vec<String>) -> Result<Vec<String>, ArgsError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| ArgsError::ReadFile {
            path: self.path.clone(),
            source,
        })?;
        let origin = self.path.display().to_string();
        let parsed = tokenize(&content, &origin)?;
        debug!(file = %origin, count = parsed.len(), "read build arguments from file");
        Ok(override_merge(input, parsed))
    }
}

/// Inline arguments from configuration.
#[derive(Debug, Clone)]
pub struct UserArguments {
    /// The raw argument text.
    pub arguments: String,
}

impl ArgumentSource for UserArguments {
    fn configure(&self, input: Vec<String>) -> Result<Vec<String>, ArgsError> {
        let parsed = tokenize(&self.arguments, &format!("${BUILD_ARGUMENTS}"))?;
        Ok(override_merge(input, parsed))
    }
}

/// Output name, classpath and launch target of the entry point.
///
/// Forces `--no-fallback` when the input names no fallback mode. For jar
/// entries any `-jar` pair already present is removed first.
pub struct EntryPointArguments<'a> {
    /// The resolved entry point.
    pub entry: &'a dyn EntryPoint,
    /// Directory the compiler writes its output into.
    pub layer_path: &'a Path,
}

impl ArgumentSource for EntryPointArguments<'_> {
    fn configure(&self, input: Vec<String>) -> Result<Vec<String>, ArgsError> {
        let has_fallback = input.iter().any(|a| FALLBACK_FLAGS.contains(&a.as_str()));

        let name = self.entry.name()?;
        let trailing = self.entry.trailing_arguments()?;

        let mut args = if trailing.iter().any(|a| a == "-jar") {
            strip_jar(input)
        } else {
            input
        };

        args.push(format!("-H:Name={}", self.layer_path.join(name).display()));
        args.push("-cp".to_string());
        args.push(self.entry.classpath());
        args.extend(trailing);

        if !has_fallback {
            args.insert(0, "--no-fallback".to_string());
        }
        Ok(args)
    }
}
