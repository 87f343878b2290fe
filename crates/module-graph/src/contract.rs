//! Module contracts as supplied by an external loader.

use serde::{Deserialize, Serialize};

/// Unique, case-sensitive identifier of a module.
pub type Moniker = String;

/// Declared metadata for one buildable and testable unit.
///
/// `kind` and `source_root` are opaque to the planner and pass through
/// untouched for whoever picks a build or test strategy downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContract {
    /// Identifier of the module, unique within a registry.
    pub moniker: Moniker,
    /// Category tag consumed by build and test strategies.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Repository-relative path of the module sources.
    #[serde(default)]
    pub source_root: String,
    /// Monikers this module requires to be built and tested first.
    #[serde(default)]
    pub dependencies: Vec<Moniker>,
}

impl ModuleContract {
    /// Create a contract with no type or source root.
    pub fn new<I, S>(moniker: impl Into<Moniker>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Moniker>,
    {
        Self {
            moniker: moniker.into(),
            kind: String::new(),
            source_root: String::new(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the category tag.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the source root.
    #[must_use]
    pub fn with_source_root(mut self, source_root: impl Into<String>) -> Self {
        self.source_root = source_root.into();
        self
    }

    /// Dependency monikers in declared order, duplicates removed.
    pub fn unique_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .enumerate()
            .filter(|&(i, dep)| !self.dependencies[..i].contains(dep))
            .map(|(_, dep)| dep.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_dependencies_keeps_first_occurrence() {
        let contract = ModuleContract::new("tests", ["cli", "core", "cli", "docs", "core"]);
        let deps: Vec<&str> = contract.unique_dependencies().collect();
        assert_eq!(deps, vec!["cli", "core", "docs"]);
    }

    #[test]
    fn test_deserialize_uses_type_field() {
        let contract: ModuleContract = serde_json::from_str(
            r#"{"moniker": "cli", "type": "go", "source_root": "cmd/cli", "dependencies": ["core"]}"#,
        )
        .unwrap();
        assert_eq!(contract.kind, "go");
        assert_eq!(contract.source_root, "cmd/cli");
        assert_eq!(contract.dependencies, vec!["core".to_string()]);
    }

    #[test]
    fn test_deserialize_defaults() {
        let contract: ModuleContract = serde_json::from_str(r#"{"moniker": "core"}"#).unwrap();
        assert!(contract.kind.is_empty());
        assert!(contract.dependencies.is_empty());
    }
}
