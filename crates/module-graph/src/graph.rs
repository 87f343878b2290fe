//! Dependency graph builder using petgraph.
//!
//! This module validates module contracts and builds the forward and reverse
//! adjacency between them. Acyclicity is not checked here: a cyclic graph can
//! still be inspected and rendered, and only planning rejects it.

use crate::{Error, GraphStatistics, Moniker, ModuleRegistry, Result};
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Directed graph over module monikers.
///
/// An edge `a -> b` in the public maps means "a depends on b". Internally
/// the petgraph edges run from dependency to dependent, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyGraph {
    /// Planned monikers in registry order.
    nodes: Vec<Moniker>,
    /// Forward edges, deduplicated, in declared order.
    dependencies: BTreeMap<Moniker, Vec<Moniker>>,
    /// Reverse edges, sorted.
    dependents: BTreeMap<Moniker, Vec<Moniker>>,
    statistics: GraphStatistics,
    #[serde(skip)]
    graph: DiGraph<Moniker, ()>,
    #[serde(skip)]
    name_to_node: HashMap<Moniker, NodeIndex>,
}

impl DependencyGraph {
    /// Build the graph of every module in the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a module depends on itself or on an unknown module.
    pub fn full(registry: &ModuleRegistry) -> Result<Self> {
        Self::build::<&str>(registry, &[])
    }

    /// Build the graph for `subset` and everything it transitively depends on.
    ///
    /// An empty subset selects the whole registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownModule`] if a requested moniker is not
    /// registered, [`Error::SelfDependency`] or [`Error::UnknownDependency`] if
    /// an included contract is malformed. The first offending module in
    /// registry order is reported.
    pub fn build<S: AsRef<str>>(registry: &ModuleRegistry, subset: &[S]) -> Result<Self> {
        let nodes: Vec<Moniker> = if subset.is_empty() {
            registry.monikers().map(String::from).collect()
        } else {
            for requested in subset {
                let requested = requested.as_ref();
                if !registry.contains(requested) {
                    return Err(Error::UnknownModule {
                        moniker: requested.to_string(),
                    });
                }
            }
            let closure = compute_transitive_closure(
                subset.iter().map(|s| s.as_ref()),
                |name| registry.get(name).map(|m| m.dependencies.as_slice()),
            );
            debug!(
                requested = subset.len(),
                included = closure.len(),
                "Expanded requested modules to their dependency closure"
            );
            registry
                .monikers()
                .filter(|m| closure.contains(*m))
                .map(String::from)
                .collect()
        };

        let mut dependencies = BTreeMap::new();
        for moniker in &nodes {
            let Some(contract) = registry.get(moniker) else {
                continue;
            };
            let mut deps = Vec::new();
            for dep in contract.unique_dependencies() {
                if dep == moniker {
                    return Err(Error::SelfDependency {
                        module: moniker.clone(),
                    });
                }
                if !registry.contains(dep) {
                    return Err(Error::UnknownDependency {
                        module: moniker.clone(),
                        missing_dependency: dep.to_string(),
                    });
                }
                deps.push(dep.to_string());
            }
            dependencies.insert(moniker.clone(), deps);
        }

        let mut graph = DiGraph::new();
        let mut name_to_node = HashMap::new();
        for moniker in &nodes {
            let node = graph.add_node(moniker.clone());
            name_to_node.insert(moniker.clone(), node);
            debug!("Added module node '{}'", moniker);
        }

        let mut dependents: BTreeMap<Moniker, Vec<Moniker>> =
            nodes.iter().map(|m| (m.clone(), Vec::new())).collect();
        for (module, deps) in &dependencies {
            for dep in deps {
                if let (Some(&from), Some(&to)) = (name_to_node.get(dep), name_to_node.get(module))
                {
                    graph.add_edge(from, to, ());
                }
                if let Some(reverse) = dependents.get_mut(dep) {
                    reverse.push(module.clone());
                }
            }
        }
        for reverse in dependents.values_mut() {
            reverse.sort_unstable();
        }

        let statistics = GraphStatistics::compute(&dependencies, &dependents);
        debug!(
            modules = statistics.total_modules,
            dependencies = statistics.total_dependencies,
            "Dependency graph built"
        );

        Ok(Self {
            nodes,
            dependencies,
            dependents,
            statistics,
            graph,
            name_to_node,
        })
    }

    /// Monikers in the graph, in registry order.
    #[must_use]
    pub fn nodes(&self) -> &[Moniker] {
        &self.nodes
    }

    /// Forward edges keyed by moniker.
    #[must_use]
    pub fn dependencies(&self) -> &BTreeMap<Moniker, Vec<Moniker>> {
        &self.dependencies
    }

    /// Reverse edges keyed by moniker.
    #[must_use]
    pub fn dependents(&self) -> &BTreeMap<Moniker, Vec<Moniker>> {
        &self.dependents
    }

    /// Aggregate statistics over the included modules.
    #[must_use]
    pub fn statistics(&self) -> &GraphStatistics {
        &self.statistics
    }

    /// Modules that `moniker` depends on. Empty if it is not in the graph.
    #[must_use]
    pub fn dependencies_of(&self, moniker: &str) -> &[Moniker] {
        self.dependencies.get(moniker).map(Vec::as_slice).unwrap_or_default()
    }

    /// Modules that depend on `moniker`. Empty if it is not in the graph.
    #[must_use]
    pub fn dependents_of(&self, moniker: &str) -> &[Moniker] {
        self.dependents.get(moniker).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `moniker` is part of the graph.
    #[must_use]
    pub fn contains(&self, moniker: &str) -> bool {
        self.name_to_node.contains_key(moniker)
    }

    /// Number of modules in the graph.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.nodes.len()
    }

    /// Modules with no dependencies, sorted.
    #[must_use]
    pub fn root_modules(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(m, _)| m.as_str())
            .collect()
    }

    /// Modules nothing depends on, sorted.
    #[must_use]
    pub fn leaf_modules(&self) -> Vec<&str> {
        self.dependents
            .iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(m, _)| m.as_str())
            .collect()
    }

    /// Check if the graph has cycles.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Strongly connected components with more than one module, restricted
    /// to `among`. Each component and the list itself are sorted.
    pub(crate) fn cycles_among(&self, among: &HashSet<&str>) -> Vec<Vec<Moniker>> {
        let mut cycles: Vec<Vec<Moniker>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut names: Vec<Moniker> = component
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .filter(|name| among.contains(name.as_str()))
                    .collect();
                names.sort_unstable();
                names
            })
            .filter(|names| !names.is_empty())
            .collect();
        cycles.sort_unstable();
        cycles
    }
}

/// Compute the transitive closure of dependencies from an initial set.
///
/// Given a set of starting monikers and a function to retrieve dependencies,
/// returns every moniker reachable by following dependency edges, including
/// the starting set. Names that `get_deps` does not know are kept but not
/// expanded further.
///
/// # Example
///
/// ```
/// use monoplan_module_graph::compute_transitive_closure;
/// use std::collections::HashMap;
///
/// let deps: HashMap<&str, Vec<String>> = [
///     ("core", vec![]),
///     ("cli", vec!["core".to_string()]),
///     ("tests", vec!["cli".to_string()]),
/// ]
/// .into_iter()
/// .collect();
///
/// let closure = compute_transitive_closure(["tests"], |name| deps.get(name).map(|v| v.as_slice()));
/// assert_eq!(closure.len(), 3);
/// assert!(closure.contains("core"));
/// ```
#[must_use]
pub fn compute_transitive_closure<'a>(
    initial: impl IntoIterator<Item = &'a str>,
    get_deps: impl Fn(&str) -> Option<&'a [String]>,
) -> HashSet<String> {
    let mut all = HashSet::new();
    let mut frontier: Vec<&str> = Vec::new();

    for name in initial {
        if all.insert(name.to_string()) {
            frontier.push(name);
        }
    }

    while let Some(moniker) = frontier.pop() {
        if let Some(deps) = get_deps(moniker) {
            for dep in deps {
                if all.insert(dep.clone()) {
                    frontier.push(dep.as_str());
                }
            }
        }
    }

    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModuleContract;

    fn registry(modules: &[(&str, &[&str])]) -> ModuleRegistry {
        ModuleRegistry::new(
            modules
                .iter()
                .map(|(name, deps)| ModuleContract::new(*name, deps.iter().copied())),
        )
        .unwrap()
    }

    #[test]
    fn test_full_graph_adjacency() {
        let registry = registry(&[
            ("core", &[]),
            ("cli", &["core"]),
            ("mcp-docs", &["core"]),
            ("tests", &["cli", "mcp-docs"]),
        ]);
        let graph = DependencyGraph::full(&registry).unwrap();

        assert_eq!(graph.nodes(), &["core", "cli", "mcp-docs", "tests"]);
        assert_eq!(graph.dependencies_of("tests"), &["cli", "mcp-docs"]);
        assert_eq!(graph.dependents_of("core"), &["cli", "mcp-docs"]);
        assert!(graph.dependents_of("tests").is_empty());
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_duplicate_dependencies_are_collapsed() {
        let registry = registry(&[("core", &[]), ("cli", &["core", "core"])]);
        let graph = DependencyGraph::full(&registry).unwrap();

        assert_eq!(graph.dependencies_of("cli"), &["core"]);
        assert_eq!(graph.dependents_of("core"), &["cli"]);
        assert_eq!(graph.statistics().total_dependencies, 1);
    }

    #[test]
    fn test_subset_expands_to_closure() {
        let registry = registry(&[
            ("core", &[]),
            ("cli", &["core"]),
            ("docs", &["core"]),
            ("unrelated", &[]),
        ]);
        let graph = DependencyGraph::build(&registry, &["cli"]).unwrap();

        assert_eq!(graph.nodes(), &["core", "cli"]);
        assert!(!graph.contains("docs"));
        assert_eq!(graph.dependents_of("core"), &["cli"]);
        assert_eq!(graph.statistics().total_modules, 2);
    }

    #[test]
    fn test_unknown_dependency() {
        let registry = registry(&[("x", &["y"])]);
        let err = DependencyGraph::full(&registry).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownDependency {
                module: "x".to_string(),
                missing_dependency: "y".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_dependency_outside_subset_is_ignored() {
        let registry = registry(&[("core", &[]), ("broken", &["missing"])]);
        let graph = DependencyGraph::build(&registry, &["core"]).unwrap();
        assert_eq!(graph.nodes(), &["core"]);
    }

    #[test]
    fn test_self_dependency() {
        let registry = registry(&[("core", &["core"])]);
        let err = DependencyGraph::full(&registry).unwrap_err();
        assert_eq!(
            err,
            Error::SelfDependency {
                module: "core".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_requested_module() {
        let registry = registry(&[("core", &[])]);
        let err = DependencyGraph::build(&registry, &["Core"]).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownModule {
                moniker: "Core".to_string()
            }
        );
    }

    #[test]
    fn test_cyclic_graph_still_builds() {
        let registry = registry(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"]), ("d", &[])]);
        let graph = DependencyGraph::full(&registry).unwrap();

        assert!(graph.has_cycles());
        let among: HashSet<&str> = ["a", "b", "c"].into_iter().collect();
        assert_eq!(graph.cycles_among(&among), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_root_and_leaf_modules() {
        let registry = registry(&[("core", &[]), ("cli", &["core"]), ("docs", &["core"])]);
        let graph = DependencyGraph::full(&registry).unwrap();

        assert_eq!(graph.root_modules(), vec!["core"]);
        assert_eq!(graph.leaf_modules(), vec!["cli", "docs"]);
    }

    #[test]
    fn test_empty_registry_builds_empty_graph() {
        let registry = registry(&[]);
        let graph = DependencyGraph::full(&registry).unwrap();
        assert_eq!(graph.module_count(), 0);
        assert_eq!(graph.statistics(), &GraphStatistics::default());
    }

    #[test]
    fn test_transitive_closure_keeps_unknown_names() {
        let deps: HashMap<&str, Vec<String>> =
            [("a", vec!["b".to_string()])].into_iter().collect();
        let closure = compute_transitive_closure(["a"], |name| deps.get(name).map(|v| v.as_slice()));
        assert_eq!(closure.len(), 2);
        assert!(closure.contains("b"));
    }
}
