//! Command dispatch.

pub mod graph;
pub mod plan;
pub mod stats;
pub mod validate;
pub mod version;

use crate::errors::CliError;
use crate::logging::correlation_id;
use crate::manifest::{ManifestLoader, load_registry};
use crate::render::{GraphFormat, OutputFormat};
use std::io::Write;
use std::path::PathBuf;

/// A parsed command ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Graph {
        manifest: PathBuf,
        modules: Vec<String>,
        format: GraphFormat,
    },
    Plan {
        manifest: PathBuf,
        modules: Vec<String>,
        format: OutputFormat,
    },
    Stats {
        manifest: PathBuf,
        modules: Vec<String>,
        format: OutputFormat,
    },
    Validate {
        manifest: PathBuf,
    },
    Version,
}

impl Command {
    const fn name(&self) -> &'static str {
        match self {
            Self::Graph { .. } => "graph",
            Self::Plan { .. } => "plan",
            Self::Stats { .. } => "stats",
            Self::Validate { .. } => "validate",
            Self::Version => "version",
        }
    }
}

/// Execute a command, writing its output to `out`.
pub fn execute(command: Command, out: &mut impl Write) -> Result<(), CliError> {
    let span = tracing::info_span!(
        "command",
        command = command.name(),
        correlation_id = %correlation_id(),
    );
    let _guard = span.enter();

    match command {
        Command::Graph {
            manifest,
            modules,
            format,
        } => {
            let registry = load_registry(&ManifestLoader::new(manifest))?;
            graph::execute(&registry, &modules, format, out)
        }
        Command::Plan {
            manifest,
            modules,
            format,
        } => {
            let registry = load_registry(&ManifestLoader::new(manifest))?;
            plan::execute(&registry, &modules, format, out)
        }
        Command::Stats {
            manifest,
            modules,
            format,
        } => {
            let registry = load_registry(&ManifestLoader::new(manifest))?;
            stats::execute(&registry, &modules, format, out)
        }
        Command::Validate { manifest } => {
            let registry = load_registry(&ManifestLoader::new(manifest))?;
            validate::execute(&registry, out)
        }
        Command::Version => version::execute(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("monoplan.toml");
        fs::write(
            &path,
            r#"
[[module]]
moniker = "core"

[[module]]
moniker = "cli"
dependencies = ["core"]

[[module]]
moniker = "mcp-docs"
dependencies = ["core"]

[[module]]
moniker = "tests"
dependencies = ["cli", "mcp-docs"]
"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_execute_plan_scoped() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        execute(
            Command::Plan {
                manifest: write_manifest(&dir),
                modules: vec!["tests".to_string()],
                format: OutputFormat::Text,
            },
            &mut out,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Layer 0: core\nLayer 1: cli, mcp-docs\nLayer 2: tests\n"
        );
    }

    #[test]
    fn test_execute_unknown_requested_module() {
        let dir = TempDir::new().unwrap();
        let err = execute(
            Command::Stats {
                manifest: write_manifest(&dir),
                modules: vec!["nope".to_string()],
                format: OutputFormat::Text,
            },
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CliError::Graph(monoplan_module_graph::Error::UnknownModule { .. })
        ));
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::Version.name(), "version");
        assert_eq!(
            Command::Validate {
                manifest: PathBuf::from("x.toml")
            }
            .name(),
            "validate"
        );
    }
}
