//! List puzzles available in the content directory

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use console::style;
use tactics_content::ContentFactory;

/// List puzzles available in the content directory
#[derive(Parser)]
pub struct List {}

impl List {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let factory = ContentFactory::new(data_dir);
        let names = factory.puzzle_names()?;

        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            factory.data_dir().display()
        );
        if names.is_empty() {
            println!("  (no puzzles)");
        }
        for name in names {
            match factory.load_puzzle(&name) {
                Ok(puzzle) => println!(
                    "  {} {}x{}, {} enem{}, roster {:?}",
                    style(&name).green(),
                    puzzle.width(),
                    puzzle.height(),
                    puzzle.enemies.len(),
                    if puzzle.enemies.len() == 1 { "y" } else { "ies" },
                    puzzle.available_characters
                ),
                Err(e) => println!("  {} {}", style(&name).red(), e),
            }
        }
        Ok(())
    }
}
