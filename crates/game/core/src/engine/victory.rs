//! End-of-turn win and loss evaluation (turn step 9).

use crate::env::{CollectibleKind, GameEnv};
use crate::puzzle::WinCondition;
use crate::state::{EndReason, GameState, GameStatus, TileKind};

fn living_characters(state: &GameState) -> u32 {
    state.entities.characters().filter(|e| e.is_alive()).count() as u32
}

/// Whether one win condition holds right now.
pub fn condition_met(state: &GameState, env: &GameEnv<'_>, condition: &WinCondition) -> bool {
    match condition {
        WinCondition::DefeatAllEnemies => state.entities.enemies().all(|e| e.dead || e.dormant),
        WinCondition::CollectAll => state.collectibles.iter().all(|c| c.collected),
        WinCondition::ReachGoal { count } => {
            let on_goal = state
                .entities
                .characters()
                .filter(|e| e.is_alive())
                .filter(|e| state.grid.tile(e.position).is_some_and(|t| t.kind == TileKind::Goal))
                .count() as u32;
            on_goal >= (*count).max(1)
        }
        WinCondition::SurviveTurns { turns } => state.turn >= *turns,
        WinCondition::WinWithinTurns { turns } => state.turn <= *turns,
        WinCondition::MaxCharacters { count } => state.rules.placed_characters <= *count,
        WinCondition::KeepAlive { count } => living_characters(state) >= *count,
        WinCondition::CollectAllKeys => state
            .collectibles
            .iter()
            .filter(|c| {
                env.collectible(&c.collectible_id)
                    .is_some_and(|d| d.kind == CollectibleKind::Key)
            })
            .all(|c| c.collected),
    }
}

/// Victory when every declared condition holds; a puzzle without conditions
/// can only be lost.
pub fn is_victory(state: &GameState, env: &GameEnv<'_>) -> bool {
    !state.rules.win_conditions.is_empty()
        && state
            .rules
            .win_conditions
            .iter()
            .all(|c| condition_met(state, env, c))
}

/// First applicable loss reason, if any.
pub fn defeat_reason(state: &GameState) -> Option<EndReason> {
    let living = living_characters(state);
    if living == 0 {
        return Some(EndReason::AllCharactersDead);
    }
    for condition in &state.rules.win_conditions {
        match condition {
            WinCondition::KeepAlive { count } if living < *count => {
                return Some(EndReason::KeepAliveViolated);
            }
            WinCondition::WinWithinTurns { turns } if state.turn >= *turns => {
                return Some(EndReason::WinWindowMissed);
            }
            _ => {}
        }
    }
    (state.turn >= state.rules.max_turns).then_some(EndReason::TurnLimitReached)
}

/// Settles the run's status after a turn. Victory is checked first.
pub fn settle(state: &mut GameState, env: &GameEnv<'_>) {
    if is_victory(state, env) {
        state.status = GameStatus::Victory;
        state.end_reason = Some(EndReason::AllConditionsMet);
    } else if let Some(reason) = defeat_reason(state) {
        state.status = GameStatus::Defeat;
        state.end_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AssetCatalog, CollectibleDefinition};
    use crate::geometry::Direction;
    use crate::state::{
        CollectibleState, Entity, EntityId, GameRules, Grid, Position, Team, Tile,
    };

    fn board(conditions: Vec<WinCondition>) -> GameState {
        let mut grid = Grid::new(3, 1);
        grid.set(Position::new(2, 0), Some(Tile::goal()));
        let rules = GameRules {
            win_conditions: conditions,
            max_turns: 10,
            placed_characters: 1,
        };
        let mut state = GameState::new(grid, rules, 0);
        state.status = GameStatus::Running;
        state.turn = 1;
        state.entities.spawn(Entity::new(
            EntityId(0),
            Team::Character,
            "hero",
            Position::new(0, 0),
            Direction::East,
            3,
        ));
        state
    }

    #[test]
    fn victory_needs_every_condition() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(vec![
            WinCondition::ReachGoal { count: 1 },
            WinCondition::SurviveTurns { turns: 3 },
        ]);
        if let Some(hero) = state.entity_mut(EntityId(0)) {
            hero.position = Position::new(2, 0);
        }
        assert!(!is_victory(&state, &env));
        state.turn = 3;
        assert!(is_victory(&state, &env));
    }

    #[test]
    fn victory_is_checked_before_the_turn_limit() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(vec![WinCondition::DefeatAllEnemies]);
        state.turn = 10;
        settle(&mut state, &env);
        assert_eq!(state.status, GameStatus::Victory);
        assert_eq!(state.end_reason, Some(EndReason::AllConditionsMet));
    }

    #[test]
    fn dormant_enemies_do_not_block_defeat_all() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(vec![WinCondition::DefeatAllEnemies]);
        let mut dormant = Entity::new(
            EntityId(0),
            Team::Enemy,
            "ghoul",
            Position::new(1, 0),
            Direction::West,
            2,
        );
        dormant.dormant = true;
        state.entities.spawn(dormant);
        assert!(is_victory(&state, &env));
    }

    #[test]
    fn key_condition_ignores_plain_items() {
        let catalog = AssetCatalog::new()
            .with_collectible(CollectibleDefinition::new("key", CollectibleKind::Key, 0))
            .with_collectible(CollectibleDefinition::new("coin", CollectibleKind::Item, 5));
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(vec![WinCondition::CollectAllKeys]);
        let mut key = CollectibleState::new("key", Position::new(1, 0));
        key.collected = true;
        state.collectibles = vec![key, CollectibleState::new("coin", Position::new(2, 0))];

        assert!(is_victory(&state, &env));
        assert!(!condition_met(&state, &env, &WinCondition::CollectAll));
    }

    #[test]
    fn defeat_reasons() {
        let mut state = board(vec![WinCondition::WinWithinTurns { turns: 4 }]);
        assert_eq!(defeat_reason(&state), None);
        state.turn = 4;
        assert_eq!(defeat_reason(&state), Some(EndReason::WinWindowMissed));

        let mut state = board(vec![WinCondition::KeepAlive { count: 2 }]);
        assert_eq!(defeat_reason(&state), Some(EndReason::KeepAliveViolated));
        if let Some(hero) = state.entity_mut(EntityId(0)) {
            hero.dead = true;
        }
        assert_eq!(defeat_reason(&state), Some(EndReason::AllCharactersDead));

        let mut state = board(Vec::new());
        state.turn = 10;
        assert_eq!(defeat_reason(&state), Some(EndReason::TurnLimitReached));
    }
}
