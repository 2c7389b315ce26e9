//! Content factory for loading assets, puzzles, and configuration from a data directory.

use std::path::{Path, PathBuf};

use tactics_core::{AssetCatalog, Puzzle};
use tactics_solver::SolverConfig;

use crate::loaders::{AssetLoader, ConfigLoader, LoadResult, PuzzleLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── assets.ron
/// ├── solver.toml
/// └── puzzles/
///     ├── first_steps.ron
///     └── two_keys.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the asset catalog from `assets.ron`.
    pub fn load_assets(&self) -> LoadResult<AssetCatalog> {
        AssetLoader::load(&self.data_dir.join("assets.ron"))
    }

    /// Load solver configuration from `solver.toml`, or defaults when the
    /// file does not exist.
    pub fn load_solver_config(&self) -> LoadResult<SolverConfig> {
        let path = self.data_dir.join("solver.toml");
        if !path.exists() {
            return Ok(SolverConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a puzzle from `puzzles/{name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the puzzle file (without `.ron` extension)
    pub fn load_puzzle(&self, name: &str) -> LoadResult<Puzzle> {
        PuzzleLoader::load(&self.puzzle_path(name))
    }

    /// Names of every puzzle under `puzzles/`, sorted.
    pub fn puzzle_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("puzzles");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn puzzle_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("puzzles").join(format!("{}.ron", name))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
