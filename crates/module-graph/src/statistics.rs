//! Aggregate statistics over a dependency graph.

use crate::Moniker;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary counts for the modules included in a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    /// Number of modules.
    pub total_modules: usize,
    /// Sum of all forward-edge counts.
    pub total_dependencies: usize,
    /// Modules with nothing to wait on (no dependencies).
    pub root_modules: usize,
    /// Modules nothing depends on.
    pub leaf_modules: usize,
    /// Largest out-degree.
    pub max_dependencies: usize,
    /// Largest in-degree.
    pub max_dependents: usize,
}

impl GraphStatistics {
    pub(crate) fn compute(
        dependencies: &BTreeMap<Moniker, Vec<Moniker>>,
        dependents: &BTreeMap<Moniker, Vec<Moniker>>,
    ) -> Self {
        let degrees = |edges: &BTreeMap<Moniker, Vec<Moniker>>| {
            edges.values().map(Vec::len).collect::<Vec<_>>()
        };
        let out_degrees = degrees(dependencies);
        let in_degrees = degrees(dependents);

        Self {
            total_modules: dependencies.len(),
            total_dependencies: out_degrees.iter().sum(),
            root_modules: out_degrees.iter().filter(|&&d| d == 0).count(),
            leaf_modules: in_degrees.iter().filter(|&&d| d == 0).count(),
            max_dependencies: out_degrees.iter().copied().max().unwrap_or(0),
            max_dependents: in_degrees.iter().copied().max().unwrap_or(0),
        }
    }
}
