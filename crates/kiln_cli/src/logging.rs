//! Log output for the CLI.

use tracing_subscriber::EnvFilter;

use crate::GlobalArgs;

/// Installs a stderr subscriber.
///
/// `--quiet` and `--verbose` pick the level; otherwise `RUST_LOG` applies,
/// defaulting to `info`.
pub fn init(global: &GlobalArgs) {
    let filter = match level(global) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn level(global: &GlobalArgs) -> Option<&'static str> {
    if global.quiet {
        Some("error")
    } else if global.verbose {
        Some("debug")
    } else {
        None
    }
}
