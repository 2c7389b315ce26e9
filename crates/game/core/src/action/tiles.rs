//! Custom tile behaviors fired when an entity enters a tile.

use tracing::{debug, trace, warn};

use super::movement::{is_wall_like, pick_up};
use crate::combat::{DamageKind, apply_damage};
use crate::env::{CustomTileType, GameEnv, PlateEffect, TileBehavior};
use crate::geometry::Direction;
use crate::state::{EntityId, GameState, ParticleKind, Position, Team, TileKind, TurnFlags};

/// The custom tile type at `position`, if its cadence is active this turn.
///
/// The tile's own cadence overrides the type's.
fn active_type<'a>(
    state: &GameState,
    env: &GameEnv<'a>,
    position: Position,
) -> Option<&'a CustomTileType> {
    let tile = state.grid.tile(position)?;
    let custom = tile.custom.as_deref()?;
    let Some(tile_type) = env.tile_type(custom) else {
        warn!(tile_type = custom, %position, "custom tile type not found");
        return None;
    };
    let cadence = tile.cadence.as_ref().or(tile_type.cadence.as_ref());
    match cadence {
        Some(cadence) if !cadence.is_active(state.turn) => {
            trace!(%position, turn = state.turn, "tile inactive this turn");
            None
        }
        _ => Some(tile_type),
    }
}

/// Fires the behaviors of the tile `id` just entered while moving `direction`.
pub(crate) fn on_enter(state: &mut GameState, env: &GameEnv<'_>, id: EntityId, direction: Direction) {
    let Some(position) = state.entity(id).filter(|e| e.is_alive()).map(|e| e.position) else {
        return;
    };
    let Some(tile_type) = active_type(state, env, position) else {
        return;
    };

    if tile_type.behaviors.contains(&TileBehavior::Ice) {
        slide(state, env, id, direction);
        let Some(resting) = state.entity(id).map(|e| e.position) else {
            return;
        };
        if let Some(resting_type) = active_type(state, env, resting) {
            run_behaviors(state, env, id, resting, resting_type);
        }
    } else {
        run_behaviors(state, env, id, position, tile_type);
    }
}

/// Slides one tile at a time until the next tile is blocked.
fn slide(state: &mut GameState, env: &GameEnv<'_>, id: EntityId, direction: Direction) {
    let limit = state.grid.area();
    for _ in 0..limit {
        let Some(entity) = state.entity(id) else {
            return;
        };
        let next = entity.position.neighbor(direction);
        let ghost = entity.combat.ghost;
        if is_wall_like(state, id, next) {
            break;
        }
        if !ghost
            && (state.entities.blocker_at(next, id).is_some()
                || state.entities.living_at(next, Some(id)).is_some())
        {
            break;
        }

        if let Some(entity) = state.entity_mut(id) {
            entity.position = next;
            entity.flags |= TurnFlags::SLID;
        }
        pick_up(state, env, id);
    }
}

fn run_behaviors(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    position: Position,
    tile_type: &CustomTileType,
) {
    for behavior in &tile_type.behaviors {
        if !state.entity(id).is_some_and(|e| e.is_alive()) {
            return;
        }
        match behavior {
            TileBehavior::Damage {
                amount,
                once_per_entity,
            } => {
                if *once_per_entity && !state.tile_runtime.damaged_once.insert((position, id)) {
                    continue;
                }
                apply_damage(state, id, *amount, DamageKind::Direct);
            }
            TileBehavior::Teleport => teleport(state, env, id, position),
            TileBehavior::Redirect { direction } => {
                if let Some(entity) = state.entity_mut(id) {
                    entity.facing = *direction;
                    entity.flags |= TurnFlags::TURNED;
                }
            }
            TileBehavior::Ice => {}
            TileBehavior::PressurePlate { effect } => press(state, effect),
        }
    }
}

/// Moves `id` to the partner tile of its teleport group and collects what
/// lies there. Never re-triggers. Partners raised into walls are skipped.
fn teleport(state: &mut GameState, env: &GameEnv<'_>, id: EntityId, from: Position) {
    let Some(group) = state.grid.tile(from).and_then(|t| t.teleport_group) else {
        warn!(position = %from, "teleport tile without a group");
        return;
    };
    let partner = state
        .grid
        .tiles()
        .filter(|(p, t)| *p != from && !t.is_wall() && t.teleport_group == Some(group))
        .map(|(p, _)| p)
        .find(|p| state.entities.living_at(*p, Some(id)).is_none_or(|e| !e.blocks_movement()));
    let Some(partner) = partner else {
        debug!(group, "no free teleport partner");
        return;
    };

    if let Some(entity) = state.entity_mut(id) {
        entity.position = partner;
        entity.flags |= TurnFlags::TELEPORTED;
    }
    pick_up(state, env, id);
    state.emit_particle(ParticleKind::Teleport, from);
    state.emit_particle(ParticleKind::Teleport, partner);
    trace!(entity = %id, %from, to = %partner, "teleported");
}

fn press(state: &mut GameState, effect: &PlateEffect) {
    match effect {
        PlateEffect::ToggleWall { x, y } => {
            let target = Position::new(*x, *y);
            let occupied = state.entities.living_at(target, None).is_some();
            let Some(tile) = state.grid.tile_mut(target) else {
                warn!(%target, "plate targets a void tile");
                return;
            };
            if tile.is_wall() {
                tile.kind = TileKind::Empty;
            } else if occupied {
                debug!(%target, "plate cannot raise a wall on an occupied tile");
            } else {
                tile.kind = TileKind::Wall;
            }
        }
        PlateEffect::SpawnEnemy { index } => {
            let Some(id) = enemy_at_index(state, *index) else {
                warn!(index, "plate spawns an unknown enemy");
                return;
            };
            let Some(position) = state.entity(id).map(|e| e.position) else {
                return;
            };
            if state.entities.living_at(position, Some(id)).is_some() {
                debug!(enemy = %id, "spawn tile occupied");
                return;
            }
            if let Some(enemy) = state.entity_mut(id) {
                if enemy.dormant || enemy.dead {
                    enemy.dormant = false;
                    enemy.dead = false;
                    enemy.health = enemy.max_health;
                    enemy.active = enemy.behavior == crate::state::BehaviorKind::Active;
                    enemy.cursor = 0;
                    enemy.flags |= TurnFlags::SPAWNED;
                }
            }
        }
        PlateEffect::DespawnEnemy { index } => {
            let Some(id) = enemy_at_index(state, *index) else {
                warn!(index, "plate despawns an unknown enemy");
                return;
            };
            if let Some(enemy) = state.entity_mut(id) {
                enemy.dormant = true;
                enemy.active = false;
            }
        }
    }
}

/// Enemy `index` in puzzle order.
fn enemy_at_index(state: &GameState, index: usize) -> Option<EntityId> {
    state.entities.team_ids(Team::Enemy).get(index).copied()
}
