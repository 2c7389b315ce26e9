//! Content loaders for reading game data from files.
//!
//! Each loader parses one file format into tactics-core (or solver) types.
//! [`ContentFactory`] ties them to a data directory layout.

pub mod assets;
pub mod config;
pub mod factory;
pub mod puzzle;

pub use assets::AssetLoader;
pub use config::{ConfigLoader, SolverFile};
pub use factory::ContentFactory;
pub use puzzle::{PuzzleFile, PuzzleLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
