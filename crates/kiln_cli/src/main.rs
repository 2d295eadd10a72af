//! Kiln CLI: ahead-of-time native image builds for JVM applications.
//!
//! `kiln detect` reports the build plans an application can take part in and
//! `kiln build` compiles it into a native executable.

#![warn(missing_docs)]

mod build;
mod detect;
mod logging;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use kiln_config::Descriptor;

/// Kiln: native image builds for JVM applications.
#[derive(Parser, Debug)]
#[command(name = "kiln", version, about = "Native image builds for JVM applications")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration descriptor replacing the built-in one.
    #[arg(long, global = true)]
    pub descriptor: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report the build plans for an application.
    Detect(DetectArgs),
    /// Compile an application into a native executable.
    Build(BuildArgs),
}

/// Arguments for the `kiln detect` subcommand.
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Application directory.
    #[arg(long, default_value = ".")]
    pub app: PathBuf,

    /// Output format for the detection result.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `kiln build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Application directory. Its contents are replaced by the compiled output.
    #[arg(long, default_value = ".")]
    pub app: PathBuf,

    /// Directory holding cached layers.
    #[arg(long)]
    pub layers: PathBuf,

    /// Stack identifier. Defaults to `$CNB_STACK_ID`.
    #[arg(long)]
    pub stack: Option<String>,

    /// Output format for the build result.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom descriptor.
    pub descriptor: Option<PathBuf>,
}

impl GlobalArgs {
    /// Loads the descriptor named on the command line, or the built-in one.
    pub fn descriptor(&self) -> Result<Descriptor, kiln_config::ConfigError> {
        match &self.descriptor {
            Some(path) => kiln_config::load_descriptor(path),
            None => Ok(Descriptor::builtin()),
        }
    }
}

/// Captures the process environment once.
pub fn environment() -> BTreeMap<String, String> {
    std::env::vars().collect()
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        descriptor: cli.descriptor,
    };
    logging::init(&global);

    let result = match cli.command {
        Command::Detect(ref args) => detect::run(args, &global),
        Command::Build(ref args) => build::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
