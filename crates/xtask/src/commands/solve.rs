//! Search a puzzle for a winning placement

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use console::style;
use tactics_content::ContentFactory;
use tactics_core::GameEnv;
use tactics_solver::{SolveResult, SolverConfig, solve_async};

use crate::utils::{OutputFormat, load_puzzle, print_json};

/// Search a puzzle for a winning placement
#[derive(Parser)]
pub struct Solve {
    /// Puzzle name (file stem under puzzles/)
    #[arg(value_name = "PUZZLE")]
    puzzle: String,

    /// Attempt budget (overrides solver.toml and TACTICS_MAX_COMBINATIONS)
    #[arg(long, value_name = "N")]
    max_combinations: Option<u64>,

    /// Simulation turn cap
    #[arg(long, value_name = "TURNS")]
    turn_cap: Option<u32>,

    /// Keep searching the minimal size for the fewest-turns win
    #[arg(long)]
    fastest: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

impl Solve {
    /// Layers solver.toml, TACTICS_* variables, then flags.
    fn config(&self, data_dir: &Path) -> Result<SolverConfig> {
        let mut config = ContentFactory::new(data_dir)
            .load_solver_config()?
            .with_env_overrides();
        if let Some(budget) = self.max_combinations {
            config = config.with_max_combinations(budget);
        }
        if let Some(cap) = self.turn_cap {
            config = config.with_turn_cap(cap);
        }
        if self.fastest {
            config = config.finding_fastest();
        }
        Ok(config)
    }

    pub async fn execute(self, data_dir: &Path) -> Result<()> {
        let (catalog, puzzle) = load_puzzle(data_dir, &self.puzzle)?;
        let config = self.config(data_dir)?;
        let env = GameEnv::from_catalog(&catalog);

        let result = solve_async(&puzzle, &env, &config).await;

        match self.format {
            OutputFormat::Json => print_json(&result)?,
            OutputFormat::Summary => print_summary(&puzzle.id, &result),
        }
        Ok(())
    }
}

fn print_summary(puzzle: &str, result: &SolveResult) {
    println!("{} {}", style("Puzzle:").bold().cyan(), puzzle);
    let verdict = if result.solvable {
        style("solvable").bold().green()
    } else {
        style("not solved").bold().red()
    };
    println!("{} {}", style("Result:").bold().cyan(), verdict);
    if let Some(count) = result.min_characters_needed {
        println!("{} {}", style("Characters needed:").bold().cyan(), count);
    }
    if let Some(solution) = &result.solution_found {
        println!(
            "{} {} turn(s)",
            style("Wins in:").bold().cyan(),
            solution.turns_to_win
        );
        for placement in &solution.placements {
            println!(
                "  {} at {} facing {}",
                style(&placement.character_id).yellow(),
                placement.position(),
                placement.facing
            );
        }
    }
    println!(
        "{} {} in {:.1} ms",
        style("Tested:").bold().cyan(),
        result.total_combinations_tested,
        result.search_time_ms
    );
    if let Some(error) = &result.error {
        println!("{} {}", style("Stopped:").bold().yellow(), error);
    }
}
