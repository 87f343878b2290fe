//! Loading module contracts from a manifest file.
//!
//! A manifest is either TOML:
//!
//! ```toml
//! [[module]]
//! moniker = "cli"
//! type = "go"
//! source_root = "cmd/cli"
//! dependencies = ["core"]
//! ```
//!
//! or JSON with a top-level `modules` array of the same objects. The format
//! is picked from the file extension; anything other than `.json` is TOML.

use crate::errors::CliError;
use monoplan_module_graph::{ModuleContract, ModuleRegistry};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Source of module contracts for one invocation.
pub trait ContractLoader {
    /// Load every declared contract, in declaration order.
    fn load(&self) -> Result<Vec<ModuleContract>, CliError>;
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, alias = "module")]
    modules: Vec<ModuleContract>,
}

/// Loads contracts from a TOML or JSON manifest on disk.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    path: PathBuf,
}

impl ManifestLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl ContractLoader for ManifestLoader {
    fn load(&self) -> Result<Vec<ModuleContract>, CliError> {
        let shown = self.path.display();
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CliError::config_with_help(
                format!("Failed to read manifest {shown}: {e}"),
                "Pass --manifest <PATH> or set MONOPLAN_MANIFEST",
            )
        })?;

        let manifest: Manifest = if self.is_json() {
            serde_json::from_str(&content)
                .map_err(|e| CliError::config(format!("Invalid JSON manifest {shown}: {e}")))?
        } else {
            toml::from_str(&content)
                .map_err(|e| CliError::config(format!("Invalid TOML manifest {shown}: {e}")))?
        };

        debug!(
            path = %shown,
            modules = manifest.modules.len(),
            "Loaded module contracts"
        );
        Ok(manifest.modules)
    }
}

/// Load contracts and freeze them into a registry.
pub fn load_registry(loader: &impl ContractLoader) -> Result<ModuleRegistry, CliError> {
    Ok(ModuleRegistry::new(loader.load()?)?)
}
