//! Movement: look-ahead, wall policies, collisions, and train moves.
//!
//! A move is split into one-tile sub-steps. Each sub-step looks at the next
//! tile before moving, so a blocked mover applies its wall policy instead of
//! wasting the turn. Contact with an opponent ends the move whatever the
//! outcome; the mover only takes the tile if the occupant died and its corpse
//! does not block.

use tracing::{trace, warn};

use super::{ActionOutcome, WallPolicy, tiles};
use crate::combat::{apply_heal, resolve_contact};
use crate::config::SimulationConfig;
use crate::env::GameEnv;
use crate::geometry::{Direction, RelativeDirection};
use crate::state::{EntityId, GameState, Position, StatusKind, Team, TurnFlags};

/// Result of one movement sub-step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Blocked,
    /// Contact combat happened; the move ends here.
    Fought,
}

/// Wall, void, out of bounds, or an entity that behaves like a wall.
///
/// Ghost movers ignore wall-like entities but never grid walls.
pub fn is_wall_like(state: &GameState, mover: EntityId, position: Position) -> bool {
    match state.grid.tile(position) {
        None => true,
        Some(tile) if tile.is_wall() => true,
        Some(_) => {
            let ghost = state.entity(mover).is_some_and(|e| e.combat.ghost);
            !ghost
                && state
                    .entities
                    .iter()
                    .any(|e| e.id != mover && e.position == position && e.behaves_like_wall())
        }
    }
}

/// Whether the tile in front of `id` is wall-like.
pub fn wall_ahead(state: &GameState, id: EntityId) -> bool {
    state
        .entity(id)
        .is_some_and(|e| is_wall_like(state, id, e.position.neighbor(e.facing)))
}

/// Runs a `Move` action: `tiles` sub-steps, adjusted for slow and haste.
pub fn execute_move(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    tiles: u32,
    policy: WallPolicy,
    relative: RelativeDirection,
) -> ActionOutcome {
    let Some(entity) = state.entity(id) else {
        return ActionOutcome::NoOp;
    };
    let mut sub_steps = tiles;
    if entity.has_status(StatusKind::Haste) {
        sub_steps += SimulationConfig::HASTE_BONUS_STEPS;
    }

    let mut moved = 0;
    for _ in 0..sub_steps {
        let Some(entity) = state.entity_mut(id) else {
            break;
        };
        if !entity.is_alive() {
            break;
        }
        if entity.has_status(StatusKind::Slow) {
            entity.slow_phase = !entity.slow_phase;
            if entity.slow_phase {
                trace!(entity = %id, "slowed sub-step skipped");
                continue;
            }
        }

        let direction = entity.facing.relative(relative);
        match step(state, env, id, direction, policy, true) {
            StepOutcome::Moved => moved += 1,
            StepOutcome::Blocked | StepOutcome::Fought => break,
        }
    }

    if moved > 0 {
        ActionOutcome::Performed
    } else {
        ActionOutcome::NoOp
    }
}

fn step(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    direction: Direction,
    policy: WallPolicy,
    retry: bool,
) -> StepOutcome {
    let Some(mover) = state.entity(id) else {
        return StepOutcome::Blocked;
    };
    let from = mover.position;
    let team = mover.team;
    let ghost = mover.combat.ghost;
    let target = from.neighbor(direction);

    if is_wall_like(state, id, target) {
        return match policy {
            WallPolicy::Stop => blocked(state, id),
            WallPolicy::Continue => ghost_over(state, env, id, direction),
            turning => {
                let Some((side, angle)) = turning.rotation() else {
                    return blocked(state, id);
                };
                if let Some(entity) = state.entity_mut(id) {
                    entity.facing = entity.facing.turn(side, angle);
                    entity.flags |= TurnFlags::TURNED;
                }
                if retry {
                    step(state, env, id, direction.turn(side, angle), policy, false)
                } else {
                    blocked(state, id)
                }
            }
        };
    }

    if !ghost {
        let occupant = state
            .entities
            .blocker_at(target, id)
            .map(|e| (e.id, e.team, e.is_alive()));
        if let Some((occupant, occupant_team, alive)) = occupant {
            if !alive {
                return blocked(state, id);
            }
            if occupant_team.opposes(team) {
                resolve_contact(state, id, occupant);
                let mover_alive = state.entity(id).is_some_and(|e| e.is_alive());
                if mover_alive && state.entities.blocker_at(target, id).is_none() {
                    enter_tile(state, env, id, target, direction);
                }
                return StepOutcome::Fought;
            }
            if state.movement.vacating.contains(&occupant) {
                state.movement.overlaps.push((id, from));
                enter_tile(state, env, id, target, direction);
                return StepOutcome::Moved;
            }
            return blocked(state, id);
        }
    }

    enter_tile(state, env, id, target, direction);
    StepOutcome::Moved
}

fn blocked(state: &mut GameState, id: EntityId) -> StepOutcome {
    if let Some(entity) = state.entity_mut(id) {
        entity.flags |= TurnFlags::BLOCKED;
    }
    StepOutcome::Blocked
}

/// `Continue` policy: skip over walls to the first open tile beyond them.
fn ghost_over(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    direction: Direction,
) -> StepOutcome {
    let Some(from) = state.entity(id).map(|e| e.position) else {
        return StepOutcome::Blocked;
    };
    let mut landing = from.neighbor(direction);
    if state.grid.tile(landing).is_none() {
        return blocked(state, id);
    }

    loop {
        landing = landing.neighbor(direction);
        if state.grid.tile(landing).is_none() {
            return blocked(state, id);
        }
        if !is_wall_like(state, id, landing) {
            break;
        }
    }

    let ghost = state.entity(id).is_some_and(|e| e.combat.ghost);
    if !ghost && state.entities.blocker_at(landing, id).is_some() {
        return blocked(state, id);
    }
    enter_tile(state, env, id, landing, direction);
    StepOutcome::Moved
}

/// Places `id` on `to`, then handles pickups and tile behaviors.
pub(crate) fn enter_tile(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    to: Position,
    direction: Direction,
) {
    let Some(entity) = state.entity_mut(id) else {
        return;
    };
    entity.position = to;
    entity.flags |= TurnFlags::MOVED;

    pick_up(state, env, id);
    tiles::on_enter(state, env, id, direction);
}

/// Characters collect every uncollected collectible on their tile.
pub(crate) fn pick_up(state: &mut GameState, env: &GameEnv<'_>, id: EntityId) {
    let Some(entity) = state.entity(id) else {
        return;
    };
    if entity.team != Team::Character || !entity.is_alive() {
        return;
    }
    let position = entity.position;

    let mut score = 0i64;
    let mut heal = 0;
    for collectible in state
        .collectibles
        .iter_mut()
        .filter(|c| !c.collected && c.position == position)
    {
        collectible.collected = true;
        match env.collectible(&collectible.collectible_id) {
            Some(definition) => {
                score += i64::from(definition.score);
                heal += definition.heal;
            }
            None => warn!(
                collectible_id = %collectible.collectible_id,
                "collectible definition not found"
            ),
        }
        trace!(entity = %id, collectible_id = %collectible.collectible_id, "collected");
    }

    state.score += score;
    if heal > 0 {
        apply_heal(state, id, heal);
    }
}

/// Undoes train moves whose leader never left.
///
/// Runs at the end of each side's phase: any mover still sharing a tile with
/// a living blocker steps back to the tile it came from.
pub fn settle_overlaps(state: &mut GameState) {
    let overlaps = std::mem::take(&mut state.movement.overlaps);
    for (id, previous) in overlaps.into_iter().rev() {
        let Some(position) = state.entity(id).filter(|e| e.is_alive()).map(|e| e.position) else {
            continue;
        };
        let shared = state
            .entities
            .iter()
            .any(|e| e.id != id && e.position == position && e.is_alive() && e.blocks_movement());
        if shared && state.entities.blocker_at(previous, id).is_none() {
            if let Some(entity) = state.entity_mut(id) {
                trace!(entity = %id, %previous, "train move undone");
                entity.position = previous;
                entity.flags |= TurnFlags::BLOCKED;
            }
        }
    }
    state.movement.vacating.clear();
}
