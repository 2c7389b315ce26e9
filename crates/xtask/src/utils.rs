//! Utility functions for xtask commands

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tactics_content::ContentFactory;
use tactics_core::{AssetCatalog, Puzzle};

/// Output format shared by every command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Summary,
    /// Pretty-printed JSON on stdout
    Json,
}

/// Loads the asset catalog and one puzzle from the content directory.
pub fn load_puzzle(data_dir: &Path, name: &str) -> Result<(AssetCatalog, Puzzle)> {
    let factory = ContentFactory::new(data_dir);
    let catalog = factory
        .load_assets()
        .with_context(|| format!("Failed to load assets from {}", data_dir.display()))?;
    let puzzle = factory
        .load_puzzle(name)
        .with_context(|| format!("Failed to load puzzle '{}'", name))?;
    Ok((catalog, puzzle))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
