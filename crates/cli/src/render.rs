//! Output rendering for graphs, statistics, and plans.

use crate::errors::CliError;
use monoplan_module_graph::{DependencyGraph, ExecutionPlan, GraphStatistics};
use serde::Serialize;
use std::fmt::Write as _;

/// Output format for statistics and plans
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

/// Output format for the graph command
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
    /// Mermaid flowchart
    Mermaid,
}

/// Serialize a value as a JSON or YAML document.
pub fn structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::other(format!("Failed to serialize JSON: {e}"))),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| CliError::other(format!("Failed to serialize YAML: {e}"))),
        OutputFormat::Text => Err(CliError::other("text output is not a structured format")),
    }
}

fn name_list(names: &[&str]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

/// Statistics block, one `key: value` per line.
pub fn statistics_text(stats: &GraphStatistics, graph: &DependencyGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "modules: {}", stats.total_modules);
    let _ = writeln!(out, "dependencies: {}", stats.total_dependencies);
    let _ = writeln!(
        out,
        "root modules: {} ({})",
        stats.root_modules,
        name_list(&graph.root_modules())
    );
    let _ = writeln!(
        out,
        "leaf modules: {} ({})",
        stats.leaf_modules,
        name_list(&graph.leaf_modules())
    );
    let _ = writeln!(out, "max dependencies: {}", stats.max_dependencies);
    let _ = writeln!(out, "max dependents: {}", stats.max_dependents);
    out
}

/// Statistics followed by one line per module with its dependencies.
pub fn graph_text(graph: &DependencyGraph) -> String {
    let mut out = statistics_text(graph.statistics(), graph);
    out.push('\n');
    for module in graph.nodes() {
        let deps = graph.dependencies_of(module);
        if deps.is_empty() {
            let _ = writeln!(out, "{module}");
        } else {
            let _ = writeln!(out, "{module} -> {}", deps.join(", "));
        }
    }
    out
}

/// Mermaid flowchart with an edge from each module to its dependencies.
///
/// Node ids are positional so arbitrary monikers never break the syntax.
pub fn graph_mermaid(graph: &DependencyGraph) -> String {
    let ids: std::collections::HashMap<&str, String> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, module)| (module.as_str(), format!("m{i}")))
        .collect();

    let mut out = String::from("graph TD\n");
    for module in graph.nodes() {
        let _ = writeln!(out, "    {}[\"{}\"]", ids[module.as_str()], module.replace('"', "#quot;"));
    }
    for (module, deps) in graph.dependencies() {
        let mut sorted: Vec<&str> = deps.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        for dep in sorted {
            let _ = writeln!(out, "    {} --> {}", ids[module.as_str()], ids[dep]);
        }
    }
    out
}

/// One `Layer N: a, b` line per layer.
pub fn plan_text(plan: &ExecutionPlan) -> String {
    let mut out = String::new();
    for (i, layer) in plan.iter().enumerate() {
        let _ = writeln!(out, "Layer {i}: {}", layer.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use monoplan_module_graph::{ModuleContract, ModuleRegistry};

    fn graph() -> DependencyGraph {
        let registry = ModuleRegistry::new([
            ModuleContract::new("core", Vec::<String>::new()),
            ModuleContract::new("cli", ["core"]),
            ModuleContract::new("mcp-docs", ["core"]),
            ModuleContract::new("tests", ["cli", "mcp-docs"]),
        ])
        .unwrap();
        DependencyGraph::full(&registry).unwrap()
    }

    #[test]
    fn test_plan_text() {
        let plan = graph().plan().unwrap();
        assert_eq!(
            plan_text(&plan),
            "Layer 0: core\nLayer 1: cli, mcp-docs\nLayer 2: tests\n"
        );
    }

    #[test]
    fn test_graph_text_lists_dependencies() {
        let text = graph_text(&graph());
        assert!(text.starts_with("modules: 4\ndependencies: 4\n"));
        assert!(text.contains("root modules: 1 (core)\n"));
        assert!(text.contains("leaf modules: 1 (tests)\n"));
        assert!(text.ends_with("core\ncli -> core\nmcp-docs -> core\ntests -> cli, mcp-docs\n"));
    }

    #[test]
    fn test_mermaid_uses_positional_ids() {
        let mermaid = graph_mermaid(&graph());
        assert!(mermaid.starts_with("graph TD\n    m0[\"core\"]\n"));
        assert!(mermaid.contains("    m2[\"mcp-docs\"]\n"));
        assert!(mermaid.contains("    m3 --> m1\n    m3 --> m2\n"));
    }

    #[test]
    fn test_mermaid_edges_sorted_by_dependency() {
        let registry = ModuleRegistry::new([
            ModuleContract::new("core", Vec::<String>::new()),
            ModuleContract::new("docs", ["core"]),
            ModuleContract::new("app", ["docs", "core"]),
        ])
        .unwrap();
        let mermaid = graph_mermaid(&DependencyGraph::full(&registry).unwrap());
        assert!(mermaid.ends_with("    m2 --> m0\n    m2 --> m1\n    m1 --> m0\n"));
    }

    #[test]
    fn test_structured_json_plan() {
        let plan = graph().plan().unwrap();
        let json = structured(&plan, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["layer_count"], 3);
    }

    #[test]
    fn test_structured_yaml_statistics() {
        let yaml = structured(graph().statistics(), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("total_modules: 4"));
    }
}
