//! `monoplan graph`: inspect the dependency graph.

use crate::errors::CliError;
use crate::render::{self, GraphFormat, OutputFormat};
use monoplan_module_graph::{DependencyGraph, ModuleRegistry};
use std::io::Write;

/// Build the (scoped) graph and print it. Cyclic graphs are printed too.
pub fn execute(
    registry: &ModuleRegistry,
    modules: &[String],
    format: GraphFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let graph = DependencyGraph::build(registry, modules)?;
    if graph.has_cycles() {
        tracing::warn!("Dependency graph contains cycles; planning will fail");
    }

    let rendered = match format {
        GraphFormat::Text => render::graph_text(&graph),
        GraphFormat::Mermaid => render::graph_mermaid(&graph),
        GraphFormat::Json => render::structured(&graph, OutputFormat::Json)?,
        GraphFormat::Yaml => render::structured(&graph, OutputFormat::Yaml)?,
    };
    write!(out, "{rendered}")?;
    if format == GraphFormat::Json {
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use monoplan_module_graph::ModuleContract;

    #[test]
    fn test_cyclic_graph_is_rendered() {
        let registry = ModuleRegistry::new([
            ModuleContract::new("a", ["b"]),
            ModuleContract::new("b", ["a"]),
        ])
        .unwrap();
        let mut out = Vec::new();
        execute(&registry, &[], GraphFormat::Text, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a -> b\n"));
        assert!(text.contains("b -> a\n"));
    }

    #[test]
    fn test_json_graph() {
        let registry = ModuleRegistry::new([
            ModuleContract::new("core", Vec::<String>::new()),
            ModuleContract::new("cli", ["core"]),
        ])
        .unwrap();
        let mut out = Vec::new();
        execute(&registry, &["cli".to_string()], GraphFormat::Json, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["dependencies"]["cli"][0], "core");
        assert_eq!(value["statistics"]["total_modules"], 2);
    }
}
