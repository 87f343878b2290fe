//! `monoplan plan`: print the layered execution order.

use crate::errors::CliError;
use crate::render::{self, OutputFormat};
use monoplan_module_graph::{ExecutionPlan, ModuleRegistry};
use std::io::Write;

pub fn execute(
    registry: &ModuleRegistry,
    modules: &[String],
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let plan = ExecutionPlan::for_modules(registry, modules)?;
    tracing::info!(
        layers = plan.layer_count(),
        modules = plan.modules().count(),
        "Execution plan computed"
    );

    let rendered = match format {
        OutputFormat::Text => render::plan_text(&plan),
        OutputFormat::Json => render::structured(&plan, format)? + "\n",
        OutputFormat::Yaml => render::structured(&plan, format)?,
    };
    write!(out, "{rendered}")?;
    Ok(())
}
