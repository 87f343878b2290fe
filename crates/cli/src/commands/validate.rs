//! `monoplan validate`: check the whole registry can be planned.

use crate::errors::CliError;
use monoplan_module_graph::{DependencyGraph, ModuleRegistry};
use std::io::Write;

pub fn execute(registry: &ModuleRegistry, out: &mut impl Write) -> Result<(), CliError> {
    let graph = DependencyGraph::full(registry)?;
    let plan = graph.plan()?;
    let stats = graph.statistics();

    writeln!(
        out,
        "ok: {} modules, {} dependencies, {} layers",
        stats.total_modules,
        stats.total_dependencies,
        plan.layer_count()
    )?;
    Ok(())
}
