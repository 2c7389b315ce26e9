//! Solver configuration loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_solver::SolverConfig;

use crate::loaders::{LoadResult, read_file};

/// Top-level layout of `solver.toml`.
///
/// ```toml
/// [solver]
/// max_combinations = 5000
/// find_fastest = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverFile {
    pub solver: SolverConfig,
}

/// Loader for solver configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load solver configuration from a TOML file.
    ///
    /// Missing keys keep their defaults; environment overrides are the
    /// caller's choice (see [`SolverConfig::with_env_overrides`]).
    pub fn load(path: &Path) -> LoadResult<SolverConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse solver config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<SolverConfig> {
        let file: SolverFile =
            toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(file.solver)
    }
}
