//! Data-driven content definitions and loaders.
//!
//! This crate turns data files into the types the simulation consumes:
//! - Asset catalogs (characters, enemies, spells, tiles, statuses, collectibles) via RON
//! - Puzzle layouts, placements, and win conditions via RON
//! - Solver configuration via TOML
//!
//! Content is consumed through the core oracles and never appears in game state.
//! All loaders use tactics-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AssetLoader, ConfigLoader, ContentFactory, LoadResult, PuzzleFile, PuzzleLoader, SolverFile,
};
