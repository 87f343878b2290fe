//! Layered execution planning.
//!
//! Layers are computed with Kahn's algorithm generalized to levels: a module
//! lands in the first layer after all of its dependencies. Modules within a
//! layer are independent of each other and may run concurrently; callers
//! must finish a layer before starting the next one.

use crate::{DependencyGraph, Error, Moniker, ModuleRegistry, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Ordered groups of modules that can be processed in parallel.
///
/// Each layer is sorted lexicographically, and every planned module appears
/// in exactly one layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionPlan {
    layers: Vec<Vec<Moniker>>,
    layer_count: usize,
}

impl ExecutionPlan {
    /// Build the scoped graph for `subset` (or the full registry when empty)
    /// and plan it.
    ///
    /// # Errors
    ///
    /// Returns any graph construction error, or [`Error::Cycle`] if the
    /// planned modules contain a dependency cycle.
    pub fn for_modules<S: AsRef<str>>(registry: &ModuleRegistry, subset: &[S]) -> Result<Self> {
        DependencyGraph::build(registry, subset)?.plan()
    }

    /// The layers in execution order.
    #[must_use]
    pub fn layers(&self) -> &[Vec<Moniker>] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Whether the plan has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Index of the layer containing `moniker`.
    #[must_use]
    pub fn layer_of(&self, moniker: &str) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| layer.binary_search_by(|m| m.as_str().cmp(moniker)).is_ok())
    }

    /// All planned modules, layer by layer.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().flatten().map(String::as_str)
    }

    /// Iterate over the layers in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vec<Moniker>> {
        self.layers.iter()
    }
}

impl<'a> IntoIterator for &'a ExecutionPlan {
    type Item = &'a Vec<Moniker>;
    type IntoIter = std::slice::Iter<'a, Vec<Moniker>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl DependencyGraph {
    /// Compute the execution layers for this graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] naming every module that could not be placed,
    /// along with the loops among them. No partial plan is returned.
    pub fn plan(&self) -> Result<ExecutionPlan> {
        let mut remaining: HashMap<&str, usize> = self
            .dependencies()
            .iter()
            .map(|(module, deps)| (module.as_str(), deps.len()))
            .collect();

        let mut ready: Vec<&str> = remaining
            .iter()
            .filter(|&(_, &count)| count == 0)
            .map(|(&module, _)| module)
            .collect();

        let mut layers: Vec<Vec<Moniker>> = Vec::new();
        let mut placed = 0;

        while !ready.is_empty() {
            ready.sort_unstable();
            let mut next = Vec::new();

            for &module in &ready {
                remaining.remove(module);
                for dependent in self.dependents_of(module) {
                    if let Some(count) = remaining.get_mut(dependent.as_str()) {
                        *count = count.saturating_sub(1);
                        if *count == 0 {
                            next.push(dependent.as_str());
                        }
                    }
                }
            }

            debug!(
                layer = layers.len(),
                modules = ready.len(),
                "Planned execution layer"
            );
            placed += ready.len();
            layers.push(ready.iter().map(|m| (*m).to_string()).collect());
            ready = next;
        }

        if placed < self.module_count() {
            let stuck: HashSet<&str> = remaining.keys().copied().collect();
            let mut involved: Vec<Moniker> = stuck.iter().map(|m| (*m).to_string()).collect();
            involved.sort_unstable();
            let cycles = self.cycles_among(&stuck);
            debug!(
                stuck = involved.len(),
                cycles = cycles.len(),
                "Planning stopped on a dependency cycle"
            );
            return Err(Error::Cycle { involved, cycles });
        }

        let layer_count = layers.len();
        Ok(ExecutionPlan {
            layers,
            layer_count,
        })
    }
}
