//! Report problems with a puzzle's parameters

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use console::style;
use tactics_content::ContentFactory;
use tactics_core::GameEnv;
use tactics_solver::{placement_tiles, validate};

use crate::utils::{OutputFormat, load_puzzle, print_json};

/// Report problems with a puzzle's parameters
#[derive(Parser)]
pub struct Validate {
    /// Puzzle name (file stem under puzzles/)
    #[arg(value_name = "PUZZLE")]
    puzzle: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Validate {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let (catalog, puzzle) = load_puzzle(data_dir, &self.puzzle)?;
        let config = ContentFactory::new(data_dir)
            .load_solver_config()?
            .with_env_overrides();
        let env = GameEnv::from_catalog(&catalog);

        let issues = validate(&puzzle, &env, &config);
        let tiles = placement_tiles(&puzzle, &env);

        match self.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "puzzle": puzzle.id,
                "valid": issues.is_empty(),
                "issues": &issues,
                "placementTiles": tiles.len(),
            }))?,
            OutputFormat::Summary => {
                println!("{} {}", style("Puzzle:").bold().cyan(), puzzle.id);
                println!("{} {}", style("Placement tiles:").bold().cyan(), tiles.len());
                if issues.is_empty() {
                    println!("{}", style("valid").bold().green());
                } else {
                    for issue in &issues {
                        println!("  {} {}", style("-").red(), issue);
                    }
                }
            }
        }

        if !issues.is_empty() {
            anyhow::bail!("{} issue(s) found in '{}'", issues.len(), puzzle.id);
        }
        Ok(())
    }
}
