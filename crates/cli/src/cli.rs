use crate::commands::Command;
use crate::logging::{LogLevel, TracingFormat};
use crate::render::{GraphFormat, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "monoplan")]
#[command(about = "Plan dependency-ordered, parallel-safe builds and tests for monorepo modules")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'm',
        long,
        global = true,
        env = "MONOPLAN_MANIFEST",
        default_value = "monoplan.toml",
        help = "Path to the module manifest (TOML, or JSON by extension)"
    )]
    pub manifest: PathBuf,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(long, global = true, help = "Report errors as JSON on stderr")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Show the dependency graph of all or selected modules")]
    Graph {
        #[arg(help = "Modules to include, with their dependencies (default: all)")]
        modules: Vec<String>,
        #[arg(long, short = 'f', default_value = "text", value_enum)]
        format: GraphFormat,
    },
    #[command(about = "Print the layered execution order")]
    Plan {
        #[arg(help = "Modules to plan, with their dependencies (default: all)")]
        modules: Vec<String>,
        #[arg(long, short = 'f', default_value = "text", value_enum)]
        format: OutputFormat,
    },
    #[command(about = "Print dependency graph statistics")]
    Stats {
        #[arg(help = "Modules to include, with their dependencies (default: all)")]
        modules: Vec<String>,
        #[arg(long, short = 'f', default_value = "text", value_enum)]
        format: OutputFormat,
    },
    #[command(about = "Check that every module resolves and the graph is acyclic")]
    Validate,
    #[command(about = "Show version information")]
    Version,
}

impl Cli {
    /// Convert parsed arguments into an executable command.
    pub fn into_command(self) -> Command {
        let manifest = self.manifest;
        match self.command {
            Commands::Graph { modules, format } => Command::Graph {
                manifest,
                modules,
                format,
            },
            Commands::Plan { modules, format } => Command::Plan {
                manifest,
                modules,
                format,
            },
            Commands::Stats { modules, format } => Command::Stats {
                manifest,
                modules,
                format,
            },
            Commands::Validate => Command::Validate { manifest },
            Commands::Version => Command::Version,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
