//! `kiln build`: compile the application.

use kiln_build::{BuildContext, BuildResult, CommandExecutor};
use kiln_cache::Contribution;
use tracing::info;

use crate::{environment, BuildArgs, GlobalArgs, OutputFormat};

/// Environment variable naming the stack when `--stack` is not given.
const STACK_ID_VAR: &str = "CNB_STACK_ID";

/// Runs the `kiln build` command.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let env = environment();
    let stack_id = args
        .stack
        .clone()
        .or_else(|| env.get(STACK_ID_VAR).cloned())
        .unwrap_or_default();

    let context = BuildContext {
        application: std::path::absolute(&args.app)?,
        layers: std::path::absolute(&args.layers)?,
        stack_id,
        env,
        descriptor: global.descriptor()?,
    };

    let result = kiln_build::build(&context, &CommandExecutor)?;
    info!(
        "Native image {}",
        match result.contribution {
            Contribution::Reused => "reused from cache",
            Contribution::Rebuilt => "built",
        }
    );

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(0)
}

fn render_text(result: &BuildResult) -> String {
    let mut out = String::new();
    for process in &result.processes {
        let marker = if process.default { " (default)" } else { "" };
        out.push_str(&format!(
            "{}: {}{marker}\n",
            process.kind,
            process.command.display()
        ));
    }
    out
}
