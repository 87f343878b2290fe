//! Error types for module graph operations.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for module graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or planning a module graph.
///
/// Every variant is a structural property of the input contracts. None of
/// them are transient, so callers should report them rather than retry.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum Error {
    /// A module declares a dependency that no contract provides.
    #[error("Module '{module}' depends on unknown module '{missing_dependency}'")]
    #[diagnostic(
        code(monoplan::graph::unknown_dependency),
        help("Declare a module named '{missing_dependency}' or remove it from the dependencies of '{module}'")
    )]
    UnknownDependency {
        /// The module declaring the dependency.
        module: String,
        /// The dependency that could not be resolved.
        missing_dependency: String,
    },

    /// A module lists itself as a dependency.
    #[error("Module '{module}' depends on itself")]
    #[diagnostic(
        code(monoplan::graph::self_dependency),
        help("Remove '{module}' from its own dependency list")
    )]
    SelfDependency {
        /// The offending module.
        module: String,
    },

    /// The planned module set contains at least one dependency cycle.
    #[error(
        "Dependency cycle detected among modules: {}; loops: {}",
        involved.join(", "),
        format_loops(cycles)
    )]
    #[diagnostic(
        code(monoplan::graph::cycle),
        help("Remove one dependency edge from each listed loop; other modules only depend on a loop")
    )]
    Cycle {
        /// Every module that could not be placed in a layer, sorted.
        involved: Vec<String>,
        /// The loops among the involved modules, each sorted.
        cycles: Vec<Vec<String>>,
    },

    /// A requested module is not present in the registry.
    #[error("Module '{moniker}' is not declared in the registry")]
    #[diagnostic(
        code(monoplan::registry::unknown_module),
        help("Check the spelling; module identifiers are case-sensitive")
    )]
    UnknownModule {
        /// The requested moniker.
        moniker: String,
    },

    /// Two contracts share the same moniker.
    #[error("Module '{moniker}' is declared more than once")]
    #[diagnostic(
        code(monoplan::registry::duplicate_module),
        help("Module identifiers must be unique within a repository")
    )]
    DuplicateModule {
        /// The repeated moniker.
        moniker: String,
    },

    /// A contract has an empty moniker.
    #[error("Module contract #{index} has an empty moniker")]
    #[diagnostic(code(monoplan::registry::empty_moniker))]
    EmptyMoniker {
        /// Position of the contract in loader order.
        index: usize,
    },
}

/// `[a, b], [c, d]`
fn format_loops(cycles: &[Vec<String>]) -> String {
    cycles
        .iter()
        .map(|cycle| format!("[{}]", cycle.join(", ")))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// The modules named by this error, for callers that render their own report.
    #[must_use]
    pub fn monikers(&self) -> Vec<&str> {
        match self {
            Self::UnknownDependency {
                module,
                missing_dependency,
            } => vec![module.as_str(), missing_dependency.as_str()],
            Self::SelfDependency { module } => vec![module.as_str()],
            Self::Cycle { involved, .. } => involved.iter().map(String::as_str).collect(),
            Self::UnknownModule { moniker } | Self::DuplicateModule { moniker } => {
                vec![moniker.as_str()]
            }
            Self::EmptyMoniker { .. } => vec![],
        }
    }

    /// The loops reported by a [`Error::Cycle`], empty for every other variant.
    #[must_use]
    pub fn cycles(&self) -> &[Vec<String>] {
        match self {
            Self::Cycle { cycles, .. } => cycles,
            _ => &[],
        }
    }
}
