//! Search configuration.
use std::env;

use serde::{Deserialize, Serialize};
use tactics_core::SimulationConfig;

/// Tunables for one solvability search.
///
/// Deserializable from the `[solver]` table of `solver.toml`; every field is
/// optional there and falls back to [`SolverConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Attempts allowed before the search gives up with a partial result.
    pub max_combinations: u64,
    /// Hard cap on simulated turns, on top of the puzzle's own limit.
    pub turn_cap: Option<u32>,
    /// Overrides the puzzle's max-character cap when set.
    pub max_characters: Option<u32>,
    /// Exhaust the minimal subset size looking for the fewest turns.
    pub find_fastest: bool,
    /// Attempts between cooperative yields in [`crate::solve_async`].
    pub yield_every: u32,
    /// Seed for every simulated run.
    pub seed: u64,
}

impl SolverConfig {
    pub const DEFAULT_MAX_COMBINATIONS: u64 = 10_000;
    pub const DEFAULT_YIELD_EVERY: u32 = 50;

    /// Defaults overridden by environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_MAX_COMBINATIONS` - Attempt budget (default: 10000)
    /// - `TACTICS_TURN_CAP` - Simulation turn cap (default: puzzle limit)
    /// - `TACTICS_MAX_CHARACTERS` - Character cap override (default: puzzle cap)
    /// - `TACTICS_FIND_FASTEST` - Search for the fastest solution (default: false)
    /// - `TACTICS_YIELD_EVERY` - Attempts between async yields (default: 50)
    /// - `TACTICS_SEED` - Simulation seed
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies the `TACTICS_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(budget) = read_env::<u64>("TACTICS_MAX_COMBINATIONS") {
            self.max_combinations = budget;
        }
        if let Some(cap) = read_env::<u32>("TACTICS_TURN_CAP") {
            self.turn_cap = Some(cap);
        }
        if let Some(cap) = read_env::<u32>("TACTICS_MAX_CHARACTERS") {
            self.max_characters = Some(cap);
        }
        if let Some(fastest) = read_env::<bool>("TACTICS_FIND_FASTEST") {
            self.find_fastest = fastest;
        } else if env::var("TACTICS_FIND_FASTEST").is_ok() {
            self.find_fastest = true;
        }
        if let Some(every) = read_env::<u32>("TACTICS_YIELD_EVERY") {
            self.yield_every = every.max(1);
        }
        if let Some(seed) = read_env::<u64>("TACTICS_SEED") {
            self.seed = seed;
        }
        self
    }

    pub fn with_max_combinations(mut self, max_combinations: u64) -> Self {
        self.max_combinations = max_combinations;
        self
    }

    pub fn with_turn_cap(mut self, turn_cap: u32) -> Self {
        self.turn_cap = Some(turn_cap);
        self
    }

    pub fn with_max_characters(mut self, max_characters: u32) -> Self {
        self.max_characters = Some(max_characters);
        self
    }

    pub fn finding_fastest(mut self) -> Self {
        self.find_fastest = true;
        self
    }

    /// Simulation settings for each attempt.
    pub fn simulation(&self) -> SimulationConfig {
        let config = SimulationConfig::new().with_seed(self.seed);
        match self.turn_cap {
            Some(cap) => config.with_turn_cap(cap),
            None => config,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_combinations: Self::DEFAULT_MAX_COMBINATIONS,
            turn_cap: None,
            max_characters: None,
            find_fastest: false,
            yield_every: Self::DEFAULT_YIELD_EVERY,
            seed: SimulationConfig::DEFAULT_SEED,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
