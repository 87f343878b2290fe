//! Module dependency graph and execution-order planning for monoplan.
//!
//! This crate turns a set of declared module contracts into a validated
//! dependency graph and a deterministic, layered execution plan. Modules in
//! the same layer are mutually independent and may be built or tested
//! concurrently; each layer must complete before the next one starts.
//!
//! # Key Types
//!
//! - [`ModuleContract`]: declared metadata for one module
//! - [`ModuleRegistry`]: immutable collection of contracts for one invocation
//! - [`DependencyGraph`]: validated forward and reverse adjacency plus [`GraphStatistics`]
//! - [`ExecutionPlan`]: ordered layers of modules
//!
//! # Example
//!
//! ```
//! use monoplan_module_graph::{DependencyGraph, ModuleContract, ModuleRegistry};
//!
//! let registry = ModuleRegistry::new([
//!     ModuleContract::new("core", Vec::<String>::new()),
//!     ModuleContract::new("cli", ["core"]),
//!     ModuleContract::new("mcp-docs", ["core"]),
//!     ModuleContract::new("tests", ["cli", "mcp-docs"]),
//! ])?;
//!
//! let graph = DependencyGraph::build(&registry, &["tests"])?;
//! let plan = graph.plan()?;
//! assert_eq!(plan.layers(), &[vec!["core"], vec!["cli", "mcp-docs"], vec!["tests"]]);
//! # Ok::<(), monoplan_module_graph::Error>(())
//! ```

mod contract;
mod error;
mod graph;
mod plan;
mod registry;
mod statistics;

pub use contract::{ModuleContract, Moniker};
pub use error::{Error, Result};
pub use graph::{DependencyGraph, compute_transitive_closure};
pub use plan::ExecutionPlan;
pub use registry::ModuleRegistry;
pub use statistics::GraphStatistics;
