//! Event-triggered and free-running parallel actions (turn step 6).

use tracing::trace;

use crate::action::{self, AutoTarget, EventTrigger, wall_ahead};
use crate::env::GameEnv;
use crate::geometry::{chebyshev, within_radius};
use crate::state::{BehaviorKind, EntityId, GameState, Team};

/// Trigger evaluation order: enemies with melee priority, then characters, then
/// the remaining enemies. Arena order within each group.
pub fn trigger_order(state: &GameState) -> Vec<EntityId> {
    let enemies: Vec<_> = state.entities.enemies().collect();
    let mut order: Vec<EntityId> = enemies
        .iter()
        .filter(|e| e.combat.melee_priority)
        .map(|e| e.id)
        .collect();
    order.extend(state.entities.characters().map(|e| e.id));
    order.extend(
        enemies
            .iter()
            .filter(|e| !e.combat.melee_priority)
            .map(|e| e.id),
    );
    order
}

/// Whether `trigger` currently holds for `id`.
pub fn trigger_holds(state: &GameState, id: EntityId, trigger: EventTrigger) -> bool {
    let Some(entity) = state.entity(id) else {
        return false;
    };
    let opponents = || {
        state
            .entities
            .iter()
            .filter(move |e| e.is_alive() && e.team.opposes(entity.team))
    };

    match trigger {
        EventTrigger::OpponentAdjacent => {
            opponents().any(|e| chebyshev(entity.position, e.position) == 1)
        }
        EventTrigger::OpponentInRange { range } => opponents().any(|e| {
            e.position != entity.position && within_radius(entity.position, e.position, range)
        }),
        EventTrigger::OpponentContact => {
            let faced = entity.position.neighbor(entity.facing);
            opponents().any(|e| e.position == faced)
        }
        EventTrigger::WallAhead => wall_ahead(state, id),
        EventTrigger::HealthBelowHalf => entity.is_below_half_health(),
    }
}

fn can_react(state: &GameState, id: EntityId) -> bool {
    state.entity(id).is_some_and(|e| {
        e.is_alive()
            && !e.is_action_prevented()
            && (e.team == Team::Character || e.behavior == BehaviorKind::Active)
    })
}

/// Runs every parallel and triggered action whose condition holds.
///
/// Triggers fire even after the entity's sequential program is exhausted.
/// Each condition is re-checked right before its action runs, so earlier
/// reactions in the same phase are visible.
pub fn run_triggers(state: &mut GameState, env: &GameEnv<'_>) {
    for id in trigger_order(state) {
        let Some(program) = state.entity(id).map(|e| e.program.clone()) else {
            continue;
        };
        for action in program.iter().filter(|a| !a.is_cursor_driven()) {
            if !can_react(state, id) {
                break;
            }
            let mut kind = action.kind.clone();
            if let Some(trigger) = action.trigger {
                if !trigger_holds(state, id, trigger) {
                    continue;
                }
                if trigger.is_proximity() {
                    if let Some(targeting) = kind.targeting_mut() {
                        if targeting.is_unspecified() {
                            targeting.auto_target = Some(AutoTarget {
                                range: trigger.proximity_range(),
                                ..AutoTarget::default()
                            });
                        }
                    }
                }
                trace!(entity = %id, %trigger, "trigger fired");
            }
            action::execute(state, env, id, &kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, ActionKind};
    use crate::env::{AssetCatalog, AttackData, SpellAsset};
    use crate::geometry::Direction;
    use crate::state::{Entity, GameRules, Grid, Position};

    fn state() -> GameState {
        let mut state = GameState::new(Grid::new(5, 5), GameRules::default(), 1);
        state.turn = 1;
        state
    }

    fn spawn(state: &mut GameState, team: Team, x: i32, y: i32) -> EntityId {
        state.entities.spawn(Entity::new(
            EntityId(0),
            team,
            "unit",
            Position::new(x, y),
            Direction::North,
            4,
        ))
    }

    #[test]
    fn priority_enemies_react_before_characters() {
        let mut state = state();
        let plain = spawn(&mut state, Team::Enemy, 0, 0);
        let hero = spawn(&mut state, Team::Character, 1, 1);
        let fast = spawn(&mut state, Team::Enemy, 2, 2);
        if let Some(entity) = state.entity_mut(fast) {
            entity.combat.melee_priority = true;
        }
        assert_eq!(trigger_order(&state), vec![fast, hero, plain]);
    }

    #[test]
    fn predicates_follow_geometry() {
        let mut state = state();
        let hero = spawn(&mut state, Team::Character, 2, 2);
        spawn(&mut state, Team::Enemy, 3, 3);

        assert!(trigger_holds(&state, hero, EventTrigger::OpponentAdjacent));
        assert!(!trigger_holds(&state, hero, EventTrigger::OpponentInRange { range: 1 }));
        assert!(trigger_holds(&state, hero, EventTrigger::OpponentInRange { range: 2 }));
        assert!(!trigger_holds(&state, hero, EventTrigger::OpponentContact));
        assert!(!trigger_holds(&state, hero, EventTrigger::WallAhead));

        if let Some(entity) = state.entity_mut(hero) {
            entity.facing = Direction::SouthEast;
            entity.health = 1;
        }
        assert!(trigger_holds(&state, hero, EventTrigger::OpponentContact));
        assert!(trigger_holds(&state, hero, EventTrigger::HealthBelowHalf));
    }

    #[test]
    fn proximity_trigger_aims_at_the_nearest_opponent() {
        let catalog = AssetCatalog::new().with_spell(SpellAsset::new("jab", AttackData::melee(2)));
        let env = GameEnv::from_catalog(&catalog);
        let mut state = state();
        let hero = spawn(&mut state, Team::Character, 2, 2);
        if let Some(entity) = state.entity_mut(hero) {
            entity.program = vec![
                Action::new(ActionKind::spell("jab")).with_trigger(EventTrigger::OpponentAdjacent),
            ];
        }
        // Facing north, but the only opponent sits to the west.
        let enemy = spawn(&mut state, Team::Enemy, 1, 2);

        run_triggers(&mut state, &env);
        assert_eq!(state.entity(enemy).map(|e| e.health), Some(2));
    }

    #[test]
    fn exhausted_programs_keep_reacting_but_static_enemies_do_not() {
        let catalog = AssetCatalog::new().with_spell(SpellAsset::new("jab", AttackData::melee(2)));
        let env = GameEnv::from_catalog(&catalog);
        let mut state = state();
        let reaction = vec![
            Action::new(ActionKind::spell("jab")).with_trigger(EventTrigger::OpponentAdjacent),
        ];
        let hero = spawn(&mut state, Team::Character, 2, 2);
        let guard = spawn(&mut state, Team::Enemy, 2, 1);
        for id in [hero, guard] {
            if let Some(entity) = state.entity_mut(id) {
                entity.program = reaction.clone();
                entity.cursor = entity.program.len();
                entity.active = false;
            }
        }
        if let Some(entity) = state.entity_mut(guard) {
            entity.behavior = BehaviorKind::Static;
        }

        run_triggers(&mut state, &env);
        assert_eq!(state.entity(guard).map(|e| e.health), Some(2));
        assert_eq!(state.entity(hero).map(|e| e.health), Some(4));
    }

    #[test]
    fn untriggered_parallel_actions_run_every_phase() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = state();
        let hero = spawn(&mut state, Team::Character, 2, 2);
        if let Some(entity) = state.entity_mut(hero) {
            entity.program = vec![Action::parallel(ActionKind::turn(
                crate::geometry::TurnSide::Right,
                crate::geometry::TurnAngle::Deg90,
            ))];
        }

        run_triggers(&mut state, &env);
        run_triggers(&mut state, &env);
        assert_eq!(state.entity(hero).map(|e| e.facing), Some(Direction::South));
    }
}
