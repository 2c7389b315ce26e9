//! Budgeted brute-force search over roster subsets and tile assignments.
//!
//! Subset sizes are tried in ascending order, so the first size with a winning
//! run is the minimum. Every candidate runs a fresh headless simulation from
//! the untouched puzzle; no state is shared between attempts.

use std::time::Instant;

use tactics_core::{Direction, GameEnv, Placement, Position, Puzzle, SimulationConfig, simulate};
use tracing::{debug, info, warn};

use crate::config::SolverConfig;
use crate::error::SearchError;
use crate::placement::{Arrangements, Combinations, placement_tiles};
use crate::result::{SolveResult, Solution};
use crate::validate::validate;

/// Whether the search wants another step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Finished,
}

/// Candidate currently being expanded: roster subset and its tile assignments.
struct Level {
    size: usize,
    combinations: Combinations,
    subset: Option<Vec<usize>>,
    arrangements: Option<Arrangements>,
}

impl Level {
    fn new(roster: usize, size: usize) -> Self {
        Self {
            size,
            combinations: Combinations::new(roster, size),
            subset: None,
            arrangements: None,
        }
    }
}

/// Incremental search; one [`Search::step`] is one simulated attempt.
pub struct Search<'p, 'e> {
    puzzle: &'p Puzzle,
    env: &'p GameEnv<'e>,
    config: SolverConfig,
    simulation: SimulationConfig,
    roster: Vec<(String, Direction)>,
    tiles: Vec<Position>,
    max_size: usize,
    level: Option<Level>,
    tested: u64,
    best: Option<Solution>,
    winning_size: Option<u32>,
    error: Option<SearchError>,
    finished: bool,
    started: Instant,
}

impl<'p, 'e> Search<'p, 'e> {
    /// Prepares a search, running validation and tile enumeration up front.
    ///
    /// A search that cannot start is created already finished, with its error.
    pub fn new(puzzle: &'p Puzzle, env: &'p GameEnv<'e>, config: &SolverConfig) -> Self {
        let started = Instant::now();
        let mut search = Self {
            puzzle,
            env,
            config: config.clone(),
            simulation: config.simulation(),
            roster: Vec::new(),
            tiles: Vec::new(),
            max_size: 0,
            level: None,
            tested: 0,
            best: None,
            winning_size: None,
            error: None,
            finished: false,
            started,
        };

        let issues = validate(puzzle, env, config);
        if !issues.is_empty() {
            warn!(puzzle = %puzzle.id, issues = issues.len(), "puzzle failed validation");
            search.fail(SearchError::Invalid { issues });
            return search;
        }

        search.tiles = placement_tiles(puzzle, env);
        if search.tiles.is_empty() {
            warn!(puzzle = %puzzle.id, "no valid placement tiles");
            search.fail(SearchError::NoPlacementTiles);
            return search;
        }

        search.roster = puzzle
            .available_characters
            .iter()
            .filter_map(|id| env.character(id).map(|d| (id.clone(), d.default_facing)))
            .collect();
        let cap = config.max_characters.unwrap_or(puzzle.max_characters) as usize;
        search.max_size = cap.min(search.roster.len()).min(search.tiles.len());
        search.level = Some(Level::new(search.roster.len(), 1));

        info!(
            puzzle = %puzzle.id,
            roster = search.roster.len(),
            tiles = search.tiles.len(),
            max_characters = search.max_size,
            budget = config.max_combinations,
            find_fastest = config.find_fastest,
            "solver search started"
        );
        search
    }

    pub fn tested(&self) -> u64 {
        self.tested
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn fail(&mut self, error: SearchError) {
        self.error = Some(error);
        self.finished = true;
    }

    /// Next placement candidate in search order, advancing subset size when a
    /// level runs dry.
    fn next_candidate(&mut self) -> Option<(usize, Vec<Placement>)> {
        loop {
            let level = self.level.as_mut()?;

            if let (Some(subset), Some(arrangements)) =
                (level.subset.as_ref(), level.arrangements.as_mut())
            {
                if let Some(assignment) = arrangements.next() {
                    let placements = subset
                        .iter()
                        .zip(assignment)
                        .map(|(&member, tile)| {
                            let (id, facing) = &self.roster[member];
                            let position = self.tiles[tile];
                            Placement::new(id.clone(), position.x, position.y, *facing)
                        })
                        .collect();
                    return Some((level.size, placements));
                }
            }

            match level.combinations.next() {
                Some(subset) => {
                    level.arrangements = Some(Arrangements::new(self.tiles.len(), level.size));
                    level.subset = Some(subset);
                }
                None => {
                    let finished_size = level.size;
                    if self.winning_size.is_some() || finished_size >= self.max_size {
                        self.level = None;
                        return None;
                    }
                    debug!(size = finished_size + 1, "solver moving to larger subsets");
                    self.level = Some(Level::new(self.roster.len(), finished_size + 1));
                }
            }
        }
    }

    /// Runs one attempt.
    pub fn step(&mut self) -> Progress {
        if self.finished {
            return Progress::Finished;
        }
        let Some((size, placements)) = self.next_candidate() else {
            self.finished = true;
            return Progress::Finished;
        };

        self.tested += 1;
        if self.tested > self.config.max_combinations {
            warn!(
                budget = self.config.max_combinations,
                "combination budget exhausted"
            );
            self.fail(SearchError::BudgetExhausted {
                budget: self.config.max_combinations,
            });
            return Progress::Finished;
        }

        let outcome = match simulate(self.puzzle, &placements, self.env, &self.simulation) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "candidate placement rejected at setup");
                return Progress::Continue;
            }
        };
        if !outcome.is_victory() {
            return Progress::Continue;
        }

        let improves = self
            .best
            .as_ref()
            .is_none_or(|best| outcome.turns < best.turns_to_win);
        if improves {
            info!(
                characters = size,
                turns = outcome.turns,
                tested = self.tested,
                "winning placement found"
            );
            self.best = Some(Solution {
                placements,
                turns_to_win: outcome.turns,
            });
        }
        self.winning_size = Some(size as u32);

        if !self.config.find_fastest {
            self.finished = true;
            return Progress::Finished;
        }
        Progress::Continue
    }

    /// Consumes the search into its result.
    pub fn finish(self) -> SolveResult {
        let search_time_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let result = SolveResult {
            solvable: self.best.is_some(),
            min_characters_needed: self.winning_size,
            solution_found: self.best,
            total_combinations_tested: self.tested,
            search_time_ms,
            error: self.error.map(|e| e.to_string()),
        };
        info!(
            puzzle = %self.puzzle.id,
            solvable = result.solvable,
            tested = result.total_combinations_tested,
            "solver search finished"
        );
        result
    }
}

/// Searches synchronously until a result is known.
pub fn solve(puzzle: &Puzzle, env: &GameEnv<'_>, config: &SolverConfig) -> SolveResult {
    let mut search = Search::new(puzzle, env, config);
    while search.step() == Progress::Continue {}
    search.finish()
}

/// Like [`solve`], yielding to the runtime every `yield_every` attempts.
///
/// Attempts never interleave: each simulation runs to completion between
/// yields.
pub async fn solve_async(
    puzzle: &Puzzle,
    env: &GameEnv<'_>,
    config: &SolverConfig,
) -> SolveResult {
    let yield_every = u64::from(config.yield_every.max(1));
    let mut search = Search::new(puzzle, env, config);
    while search.step() == Progress::Continue {
        if search.tested() % yield_every == 0 {
            tokio::task::yield_now().await;
        }
    }
    search.finish()
}
