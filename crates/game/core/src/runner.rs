//! Headless simulation runner: puzzle + placements in, final outcome out.

use tracing::debug;

use crate::config::SimulationConfig;
use crate::engine::GameEngine;
use crate::env::GameEnv;
use crate::puzzle::{Placement, Puzzle, SetupError, instantiate};
use crate::state::{EndReason, GameState, GameStatus, StateSnapshot};

/// Final result of one headless run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RunOutcome {
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub turns: u32,
    pub score: i64,
    /// State fingerprint; only computed with the `serde` feature.
    pub fingerprint: Option<[u8; 32]>,
    pub snapshot: StateSnapshot,
}

impl RunOutcome {
    pub fn is_victory(&self) -> bool {
        self.status == GameStatus::Victory
    }
}

/// Instantiates `puzzle` with `placements` and runs it to the end.
pub fn simulate(
    puzzle: &Puzzle,
    placements: &[Placement],
    env: &GameEnv<'_>,
    config: &SimulationConfig,
) -> Result<RunOutcome, SetupError> {
    let mut state = instantiate(puzzle, placements, env, config)?;
    let outcome = run_state(&mut state, env);
    debug!(
        puzzle = %puzzle.id,
        status = %outcome.status,
        turns = outcome.turns,
        score = outcome.score,
        "simulation finished"
    );
    Ok(outcome)
}

/// Runs an already instantiated state to the end.
pub fn run_state(state: &mut GameState, env: &GameEnv<'_>) -> RunOutcome {
    GameEngine::new(state).run_to_end(env);
    RunOutcome {
        status: state.status,
        end_reason: state.end_reason,
        turns: state.turn,
        score: state.score,
        fingerprint: fingerprint(state),
        snapshot: state.snapshot(),
    }
}

#[cfg(feature = "serde")]
fn fingerprint(state: &GameState) -> Option<[u8; 32]> {
    Some(state.fingerprint())
}

#[cfg(not(feature = "serde"))]
fn fingerprint(_state: &GameState) -> Option<[u8; 32]> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, ActionKind};
    use crate::env::{
        AssetCatalog, CharacterDefinition, CollectibleDefinition, CollectibleKind, EnemyDefinition,
    };
    use crate::geometry::Direction;
    use crate::puzzle::{CollectiblePlacement, EnemyPlacement, WinCondition};
    use crate::state::{CombatProfile, Grid};

    fn catalog() -> AssetCatalog {
        AssetCatalog::new()
            .with_character(
                CharacterDefinition::new("knight", 4)
                    .with_facing(Direction::East)
                    .with_program(vec![
                        Action::new(ActionKind::forward(1)),
                        Action::new(ActionKind::Repeat),
                    ])
                    .with_combat(CombatProfile {
                        contact_damage: 2,
                        ..CombatProfile::default()
                    }),
            )
            .with_enemy(EnemyDefinition::new("slime", 2).with_score(10))
            .with_collectible(CollectibleDefinition::new("coin", CollectibleKind::Item, 5))
    }

    fn puzzle() -> Puzzle {
        Puzzle::new("corridor", Grid::new(5, 1))
            .with_enemy(EnemyPlacement::new("slime", 3, 0))
            .with_collectible(CollectiblePlacement::new("coin", 1, 0))
            .with_roster(["knight"], 1)
            .with_max_turns(8)
            .with_win_condition(WinCondition::DefeatAllEnemies)
    }

    #[test]
    fn corridor_run_wins_and_scores() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let placements = [Placement::new("knight", 0, 0, Direction::East)];

        let outcome = simulate(&puzzle(), &placements, &env, &SimulationConfig::new())
            .expect("setup succeeds");
        assert!(outcome.is_victory());
        assert_eq!(outcome.end_reason, Some(EndReason::AllConditionsMet));
        assert_eq!(outcome.turns, 3);
        assert_eq!(outcome.score, 15);
        assert_eq!(outcome.snapshot.turn, 3);
    }

    #[test]
    fn identical_inputs_give_identical_outcomes() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let placements = [Placement::new("knight", 0, 0, Direction::East)];
        let config = SimulationConfig::new().with_seed(42);

        let first = simulate(&puzzle(), &placements, &env, &config).expect("setup succeeds");
        let second = simulate(&puzzle(), &placements, &env, &config).expect("setup succeeds");
        assert_eq!(first, second);
    }

    #[test]
    fn turn_cap_forces_defeat() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let placements = [Placement::new("knight", 0, 0, Direction::West)];
        let config = SimulationConfig::new().with_turn_cap(2);

        let outcome = simulate(&puzzle(), &placements, &env, &config).expect("setup succeeds");
        assert_eq!(outcome.status, GameStatus::Defeat);
        assert_eq!(outcome.end_reason, Some(EndReason::TurnLimitReached));
        assert_eq!(outcome.turns, 2);
    }

    #[test]
    fn setup_errors_surface_before_any_turn() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let placements = [Placement::new("wizard", 0, 0, Direction::East)];
        let error = simulate(&puzzle(), &placements, &env, &SimulationConfig::new())
            .expect_err("unknown character");
        assert!(matches!(error, SetupError::UnknownCharacter { .. }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn fingerprint_is_present_with_serde() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let placements = [Placement::new("knight", 0, 0, Direction::East)];
        let outcome = simulate(&puzzle(), &placements, &env, &SimulationConfig::new())
            .expect("setup succeeds");
        let fingerprint = outcome.fingerprint.expect("fingerprint");
        assert_eq!(hex::encode(fingerprint).len(), 64);
    }
}
