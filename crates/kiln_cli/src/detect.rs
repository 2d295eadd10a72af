//! `kiln detect`: report build plans.

use kiln_build::DetectResult;
use kiln_config::ConfigResolver;
use tracing::debug;

use crate::{environment, DetectArgs, GlobalArgs, OutputFormat};

/// Runs the `kiln detect` command. Detection always passes, so the exit code
/// is 0 unless configuration is invalid.
pub fn run(args: &DetectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    debug!("detecting {}", args.app.display());
    let resolver = ConfigResolver::new(&global.descriptor()?, environment());
    let result = kiln_build::detect(&resolver)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(0)
}

fn render_text(result: &DetectResult) -> String {
    let mut out = String::new();
    for (i, plan) in result.plans.iter().enumerate() {
        let provides: Vec<&str> = plan.provides.iter().map(|p| p.name.as_str()).collect();
        let requires: Vec<&str> = plan.requires.iter().map(|r| r.name.as_str()).collect();
        out.push_str(&format!(
            "plan {}: provides [{}] requires [{}]\n",
            i + 1,
            provides.join(", "),
            requires.join(", ")
        ));
    }
    out
}
