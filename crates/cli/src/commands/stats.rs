//! `monoplan stats`: print graph statistics only.

use crate::errors::CliError;
use crate::render::{self, OutputFormat};
use monoplan_module_graph::{DependencyGraph, ModuleRegistry};
use std::io::Write;

pub fn execute(
    registry: &ModuleRegistry,
    modules: &[String],
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let graph = DependencyGraph::build(registry, modules)?;
    let stats = graph.statistics();

    let rendered = match format {
        OutputFormat::Text => render::statistics_text(stats, &graph),
        OutputFormat::Json => render::structured(stats, format)? + "\n",
        OutputFormat::Yaml => render::structured(stats, format)?,
    };
    write!(out, "{rendered}")?;
    Ok(())
}
