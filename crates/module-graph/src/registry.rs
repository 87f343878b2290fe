//! Immutable registry of module contracts.

use crate::{Error, ModuleContract, Result};
use std::collections::HashMap;

/// An immutable, queryable snapshot of module contracts.
///
/// Built once per invocation from loader output and passed by reference to
/// the graph builder. Iteration follows loader order.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleContract>,
    index: HashMap<String, usize>,
}

impl ModuleRegistry {
    /// Build a registry from contracts in loader order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMoniker`] for a contract without an identifier and
    /// [`Error::DuplicateModule`] when two contracts share a moniker.
    pub fn new(contracts: impl IntoIterator<Item = ModuleContract>) -> Result<Self> {
        let mut modules = Vec::new();
        let mut index = HashMap::new();

        for (position, contract) in contracts.into_iter().enumerate() {
            if contract.moniker.is_empty() {
                return Err(Error::EmptyMoniker { index: position });
            }
            if index.contains_key(&contract.moniker) {
                return Err(Error::DuplicateModule {
                    moniker: contract.moniker,
                });
            }
            index.insert(contract.moniker.clone(), modules.len());
            modules.push(contract);
        }

        tracing::debug!(modules = modules.len(), "Module registry constructed");
        Ok(Self { modules, index })
    }

    /// Look up a contract by moniker.
    #[must_use]
    pub fn get(&self, moniker: &str) -> Option<&ModuleContract> {
        self.index.get(moniker).map(|&i| &self.modules[i])
    }

    /// All contracts in loader order.
    #[must_use]
    pub fn all(&self) -> &[ModuleContract] {
        &self.modules
    }

    /// Whether a module with this moniker is registered.
    #[must_use]
    pub fn contains(&self, moniker: &str) -> bool {
        self.index.contains_key(moniker)
    }

    /// Monikers in loader order.
    pub fn monikers(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.moniker.as_str())
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry holds no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
