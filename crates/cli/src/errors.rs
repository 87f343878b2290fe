//! CLI error types, exit codes, and error rendering.

use miette::{Diagnostic, Report};
use std::io::{self, Write};
use thiserror::Error;

/// Successful exit code
pub const EXIT_OK: i32 = 0;
/// CLI, configuration, or manifest error exit code
pub const EXIT_CLI: i32 = 2;
/// Contract, graph, or planning error exit code
pub const EXIT_GRAPH: i32 = 3;

/// CLI-specific error types with exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// The manifest could not be read or parsed (exit code 2)
    #[error("Configuration error: {message}")]
    #[diagnostic(code(monoplan::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },

    /// The module contracts are inconsistent or cyclic (exit code 3)
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] monoplan_module_graph::Error),

    /// Writing output or another unexpected failure (exit code 3)
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(monoplan::cli::other))]
    Other {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new other error
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::other(format!("Failed to write output: {err}"))
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Graph(_) | CliError::Other { .. } => EXIT_GRAPH,
    }
}

/// JSON shape of an error when `--json` is set.
fn error_json(err: &CliError) -> serde_json::Value {
    let code = match err {
        CliError::Config { .. } => "config",
        CliError::Graph(_) => "graph",
        CliError::Other { .. } => "other",
    };
    let (monikers, cycles): (Vec<&str>, &[Vec<String>]) = match err {
        CliError::Graph(graph_err) => (graph_err.monikers(), graph_err.cycles()),
        _ => (Vec::new(), &[]),
    };
    let mut body = serde_json::json!({
        "code": code,
        "message": err.to_string(),
        "modules": monikers,
    });
    if !cycles.is_empty() {
        body["cycles"] = serde_json::json!(cycles);
    }
    serde_json::json!({
        "status": "error",
        "error": body,
    })
}

/// Render an error to stderr, as JSON or as a miette report
pub fn render_error(err: &CliError, json_mode: bool) {
    let mut stderr = io::stderr().lock();
    let written = if json_mode {
        writeln!(stderr, "{}", error_json(err))
    } else {
        writeln!(stderr, "{:?}", Report::new(err.clone()))
    };
    if let Err(e) = written {
        tracing::error!(error = %e, "Failed to write error report");
    }
    let _ = stderr.flush();
}
