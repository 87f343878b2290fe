//! monoplan CLI
//!
//! Loads module contracts from a manifest, builds the dependency graph, and
//! prints graphs, statistics, or layered execution plans.

mod cli;
mod commands;
mod errors;
mod logging;
mod manifest;
mod render;

use crate::errors::{CliError, EXIT_CLI, EXIT_OK, exit_code_for, render_error};
use crate::logging::TracingConfig;
use std::io::{self, Write};

fn main() {
    // NOTE: tracing may be unusable during a panic, so write directly.
    #[allow(clippy::print_stderr)]
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
        ..Default::default()
    };
    if let Err(report) = logging::init_tracing(tracing_config) {
        let _ = writeln!(io::stderr(), "{report:?}");
        std::process::exit(EXIT_CLI);
    }

    std::process::exit(run(cli));
}

fn run(cli: cli::Cli) -> i32 {
    let json_mode = cli.json;
    let command = cli.into_command();
    let mut stdout = io::stdout().lock();

    let result = commands::execute(command, &mut stdout)
        .and_then(|()| stdout.flush().map_err(CliError::from));
    match result {
        Ok(()) => EXIT_OK,
        Err(err) => {
            tracing::debug!(error = %err, "Command failed");
            render_error(&err, json_mode);
            exit_code_for(&err)
        }
    }
}
