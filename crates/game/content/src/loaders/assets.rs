//! Asset catalog loader.

use std::path::Path;

use tactics_core::AssetCatalog;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for the asset catalog from RON files.
///
/// The file holds one list per asset kind; every list is optional:
///
/// ```ron
/// (
///     characters: [(id: "knight", max_health: 5, default_facing: East, program: [...])],
///     enemies: [(id: "slime", max_health: 2, score: 10)],
///     spells: [],
///     custom_attacks: [],
///     tile_types: [],
///     status_effects: [],
///     collectibles: [],
/// )
/// ```
pub struct AssetLoader;

impl AssetLoader {
    /// Load an asset catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<AssetCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse asset catalog {}: {}", path.display(), e))?;
        debug!(path = %path.display(), assets = catalog.len(), "asset catalog loaded");
        Ok(catalog)
    }

    /// Parse an asset catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<AssetCatalog> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}
