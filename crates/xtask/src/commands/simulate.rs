//! Run one placement to the end and report the outcome

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use console::style;
use tactics_core::{
    ActorOracle, Direction, GameEnv, Placement, RunOutcome, SimulationConfig, simulate,
};

use crate::utils::{OutputFormat, load_puzzle, print_json};

/// Run one placement to the end and report the outcome
#[derive(Parser)]
pub struct Simulate {
    /// Puzzle name (file stem under puzzles/)
    #[arg(value_name = "PUZZLE")]
    puzzle: String,

    /// Character placement as `id@x,y[,facing]`; repeat for more characters
    #[arg(short, long = "place", value_name = "PLACEMENT", required = true)]
    placements: Vec<PlacementArg>,

    /// Simulation turn cap (defaults to the puzzle limit)
    #[arg(long, value_name = "TURNS")]
    turn_cap: Option<u32>,

    /// Simulation seed
    #[arg(long, default_value_t = SimulationConfig::DEFAULT_SEED)]
    seed: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

/// `id@x,y[,facing]` from the command line. Without a facing the character's
/// default facing applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementArg {
    character_id: String,
    x: i32,
    y: i32,
    facing: Option<Direction>,
}

impl FromStr for PlacementArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (id, rest) = s
            .split_once('@')
            .ok_or_else(|| anyhow!("expected id@x,y[,facing], got '{}'", s))?;
        if id.is_empty() {
            return Err(anyhow!("missing character id in '{}'", s));
        }

        let parts: Vec<&str> = rest.split(',').map(str::trim).collect();
        let (x, y, facing) = match parts.as_slice() {
            [x, y] => (*x, *y, None),
            [x, y, facing] => (*x, *y, Some(*facing)),
            _ => return Err(anyhow!("expected x,y[,facing] after '@' in '{}'", s)),
        };

        Ok(Self {
            character_id: id.to_string(),
            x: x.parse().with_context(|| format!("bad x coordinate '{}'", x))?,
            y: y.parse().with_context(|| format!("bad y coordinate '{}'", y))?,
            facing: facing
                .map(|f| f.parse::<Direction>().map_err(|_| anyhow!("unknown facing '{}'", f)))
                .transpose()?,
        })
    }
}

impl PlacementArg {
    fn resolve(&self, env: &GameEnv<'_>) -> Placement {
        let facing = self.facing.unwrap_or_else(|| {
            env.character(&self.character_id)
                .map(|definition| definition.default_facing)
                .unwrap_or_default()
        });
        Placement::new(self.character_id.clone(), self.x, self.y, facing)
    }
}

impl Simulate {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let (catalog, puzzle) = load_puzzle(data_dir, &self.puzzle)?;
        let env = GameEnv::from_catalog(&catalog);

        let placements: Vec<Placement> = self.placements.iter().map(|p| p.resolve(&env)).collect();
        let mut config = SimulationConfig::new().with_seed(self.seed);
        if let Some(cap) = self.turn_cap {
            config = config.with_turn_cap(cap);
        }

        let outcome = simulate(&puzzle, &placements, &env, &config)
            .with_context(|| format!("Placement rejected for '{}'", puzzle.id))?;

        match self.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "puzzle": puzzle.id,
                "placements": placements,
                "status": outcome.status,
                "endReason": outcome.end_reason,
                "turns": outcome.turns,
                "score": outcome.score,
                "fingerprint": outcome.fingerprint.map(hex::encode),
                "snapshot": outcome.snapshot,
            }))?,
            OutputFormat::Summary => print_summary(&puzzle.id, &outcome),
        }
        Ok(())
    }
}

fn print_summary(puzzle: &str, outcome: &RunOutcome) {
    println!("{} {}", style("Puzzle:").bold().cyan(), puzzle);
    let status = if outcome.is_victory() {
        style(format!("{:?}", outcome.status)).bold().green()
    } else {
        style(format!("{:?}", outcome.status)).bold().red()
    };
    println!("{} {}", style("Status:").bold().cyan(), status);
    if let Some(reason) = outcome.end_reason {
        println!("{} {}", style("Reason:").bold().cyan(), reason);
    }
    println!("{} {}", style("Turns:").bold().cyan(), outcome.turns);
    println!("{} {}", style("Score:").bold().cyan(), outcome.score);
    if let Some(fingerprint) = outcome.fingerprint {
        println!(
            "{} {}",
            style("Fingerprint:").bold().cyan(),
            hex::encode(fingerprint)
        );
    }
    println!();
    println!("{}", style("Entities:").bold().yellow());
    for entity in &outcome.snapshot.entities {
        println!(
            "  {:<3} {:<9} {:<10} {} facing {:<10} hp {}{}",
            entity.id.0,
            entity.team,
            entity.template_id,
            entity.position,
            entity.facing,
            entity.health,
            if entity.dead { " (dead)" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_placement_with_facing() {
        let arg: PlacementArg = "knight@2,3,south_east".parse().expect("valid placement");
        assert_eq!(
            arg,
            PlacementArg {
                character_id: "knight".to_string(),
                x: 2,
                y: 3,
                facing: Some(Direction::SouthEast),
            }
        );
    }

    #[test]
    fn facing_is_optional() {
        let arg: PlacementArg = "archer@0, 1".parse().expect("valid placement");
        assert_eq!((arg.x, arg.y, arg.facing), (0, 1, None));
    }

    #[test]
    fn rejects_malformed_placements() {
        for bad in ["knight", "@1,2", "knight@1", "knight@a,2", "knight@1,2,up-ish"] {
            assert!(bad.parse::<PlacementArg>().is_err(), "{bad} should fail");
        }
    }
}
