//! Attacks and spells: direction resolution and pattern dispatch.
//!
//! Spells, custom attacks, and the two built-in attacks all funnel into one
//! [`AttackData`] record. Directions come from the action's targeting override
//! first (absolute, then relative, then auto-target), and only fall back to the
//! asset's own [`DirectionMode`] when the action says nothing.

use arrayvec::ArrayVec;
use tracing::{debug, trace, warn};

use super::{ActionOutcome, AutoTarget, TargetFilter, Targeting};
use crate::combat::{DamageKind, apply_damage, apply_heal};
use crate::config::SimulationConfig;
use crate::env::{
    AreaCenter, AttackData, AttackPattern, DirectionMode, GameEnv, ProjectileSpec,
};
use crate::geometry::{Direction, distance_sq, within_radius};
use crate::projectile::{AreaPayload, burst, launch};
use crate::state::{EntityId, GameState, Position, TurnFlags};
use crate::status::apply_status;

/// One resolved firing direction, with the entity it was aimed at if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aim {
    pub direction: Direction,
    pub target: Option<EntityId>,
}

pub type Aims = ArrayVec<Aim, { SimulationConfig::MAX_ATTACK_DIRECTIONS }>;

/// Where the attack record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackSource<'a> {
    Spell { id: &'a str, cooldown: u32 },
    Custom,
    Builtin,
}

fn push_aim(aims: &mut Aims, direction: Direction, target: Option<EntityId>) {
    if aims.is_full() || aims.iter().any(|a| a.direction == direction) {
        return;
    }
    aims.push(Aim { direction, target });
}

/// Nearest of the 8 directions pointing from `from` toward `to`.
///
/// Off-axis offsets snap to the straight axis when one component is at most
/// half the other, otherwise to the diagonal.
pub fn approximate_direction(from: Position, to: Position) -> Option<Direction> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0 && dy == 0 {
        return None;
    }
    let (ax, ay) = (dx.abs(), dy.abs());
    let sx = if 2 * ax <= ay { 0 } else { dx.signum() };
    let sy = if 2 * ay <= ax { 0 } else { dy.signum() };
    Direction::from_offset(sx, sy)
}

fn passes_filter(from: Position, to: Position, filter: TargetFilter) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    match filter {
        TargetFilter::Cardinal => dx == 0 || dy == 0,
        TargetFilter::Diagonal => dx.abs() == dy.abs(),
        TargetFilter::Omni => true,
    }
}

/// Living opponents of `id` that `auto` allows, nearest first (ties by id).
pub fn nearest_opponents(
    state: &GameState,
    id: EntityId,
    auto: &AutoTarget,
) -> Vec<(EntityId, Position)> {
    let Some(source) = state.entity(id) else {
        return Vec::new();
    };
    let origin = source.position;
    let mut found: Vec<(i64, EntityId, Position)> = state
        .entities
        .iter()
        .filter(|e| e.is_alive() && e.team.opposes(source.team) && e.position != origin)
        .filter(|e| auto.range.is_none_or(|r| within_radius(origin, e.position, r)))
        .filter(|e| passes_filter(origin, e.position, auto.filter))
        .map(|e| (distance_sq(origin, e.position), e.id, e.position))
        .collect();
    found.sort_by_key(|(distance, id, _)| (*distance, *id));
    found
        .into_iter()
        .take(auto.max_targets.max(1) as usize)
        .map(|(_, id, position)| (id, position))
        .collect()
}

/// Resolves firing directions for `id`.
pub fn resolve_aims(
    state: &GameState,
    id: EntityId,
    targeting: &Targeting,
    mode: &DirectionMode,
) -> Aims {
    let mut aims = Aims::new();
    let Some(entity) = state.entity(id) else {
        return aims;
    };
    let facing = entity.facing;

    if !targeting.directions.is_empty() {
        for direction in &targeting.directions {
            push_aim(&mut aims, *direction, None);
        }
    } else if !targeting.relative.is_empty() {
        for relative in &targeting.relative {
            push_aim(&mut aims, facing.relative(*relative), None);
        }
    } else if let Some(auto) = &targeting.auto_target {
        for (target, position) in nearest_opponents(state, id, auto) {
            if let Some(direction) = approximate_direction(entity.position, position) {
                push_aim(&mut aims, direction, Some(target));
            }
        }
    } else {
        match mode {
            DirectionMode::Fixed(directions) => {
                for direction in directions {
                    push_aim(&mut aims, *direction, None);
                }
            }
            DirectionMode::CurrentFacing => push_aim(&mut aims, facing, None),
            DirectionMode::All => {
                for direction in Direction::ALL {
                    push_aim(&mut aims, direction, None);
                }
            }
            DirectionMode::Relative(offsets) => {
                for relative in offsets {
                    push_aim(&mut aims, facing.relative(*relative), None);
                }
            }
        }
    }
    aims
}

/// Casts spell `spell_id`, honoring its cooldown.
pub fn cast_spell(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    spell_id: &str,
    targeting: &Targeting,
) -> ActionOutcome {
    let Some(spell) = env.spell(spell_id) else {
        warn!(spell_id, entity = %id, "spell asset not found");
        return ActionOutcome::NoOp;
    };
    let cooling = state
        .entity(id)
        .and_then(|e| e.cooldowns.get(&spell.id))
        .is_some_and(|remaining| *remaining > 0);
    if cooling {
        debug!(spell_id, entity = %id, "spell on cooldown");
        return ActionOutcome::NoOp;
    }

    let aims = resolve_aims(state, id, targeting, &spell.directions);
    perform(
        state,
        env,
        id,
        &spell.attack,
        &aims,
        AttackSource::Spell {
            id: &spell.id,
            cooldown: spell.cooldown,
        },
    )
}

/// Runs custom attack `attack_id`; without an override it fires along the facing.
pub fn custom_attack(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    attack_id: &str,
    targeting: &Targeting,
) -> ActionOutcome {
    let Some(asset) = env.custom_attack(attack_id) else {
        warn!(attack_id, entity = %id, "custom attack asset not found");
        return ActionOutcome::NoOp;
    };
    let aims = resolve_aims(state, id, targeting, &DirectionMode::CurrentFacing);
    perform(state, env, id, &asset.attack, &aims, AttackSource::Custom)
}

/// Melee strike on the faced tile.
pub fn strike_forward(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    damage: i32,
) -> ActionOutcome {
    let aims = resolve_aims(state, id, &Targeting::default(), &DirectionMode::CurrentFacing);
    perform(state, env, id, &AttackData::melee(damage), &aims, AttackSource::Builtin)
}

/// Straight projectile along the facing.
pub fn fire_forward(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    damage: i32,
    range: u32,
    speed: u32,
) -> ActionOutcome {
    let attack = AttackData::projectile(
        damage,
        range,
        ProjectileSpec {
            speed,
            ..ProjectileSpec::default()
        },
    );
    let aims = resolve_aims(state, id, &Targeting::default(), &DirectionMode::CurrentFacing);
    perform(state, env, id, &attack, &aims, AttackSource::Builtin)
}

/// Dispatches `attack` along `aims` by pattern.
pub fn perform(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    attack: &AttackData,
    aims: &Aims,
    source: AttackSource<'_>,
) -> ActionOutcome {
    let Some(caster) = state.entity(id).filter(|e| e.is_alive()) else {
        return ActionOutcome::NoOp;
    };
    let origin = caster.position;
    let team = caster.team;

    // Heal and caster-centered areas resolve once regardless of direction.
    let needs_aim = match attack.pattern {
        AttackPattern::Heal => false,
        AttackPattern::Aoe => attack.area.as_ref().is_some_and(|a| a.center == AreaCenter::AtRange),
        AttackPattern::Melee | AttackPattern::Projectile => true,
    };
    if needs_aim && aims.is_empty() {
        debug!(entity = %id, "attack has no target direction");
        return ActionOutcome::NoOp;
    }

    let payload = AreaPayload {
        damage: attack.damage,
        heal: attack.heal,
        status_effect: attack.status_effect.as_deref(),
    };

    match attack.pattern {
        AttackPattern::Melee => {
            for aim in aims {
                melee(state, env, id, origin, aim.direction, attack);
            }
        }
        AttackPattern::Projectile => {
            let fallback = attack
                .projectile
                .homing
                .then(|| nearest_opponents(state, id, &AutoTarget::default()))
                .and_then(|found| found.first().map(|(target, _)| *target));
            for aim in aims {
                launch(state, id, aim.direction, attack, aim.target.or(fallback));
            }
        }
        AttackPattern::Aoe => {
            let spec = attack.area.clone().unwrap_or_default();
            match spec.center {
                AreaCenter::Caster => burst(state, env, id, team, origin, &spec, payload),
                AreaCenter::AtRange => {
                    for aim in aims {
                        let center = origin.step(aim.direction, attack.range as i32);
                        burst(state, env, id, team, center, &spec, payload);
                    }
                }
            }
        }
        AttackPattern::Heal => heal_allies(state, env, id, origin, attack),
    }

    if let Some(caster) = state.entity_mut(id) {
        match source {
            AttackSource::Spell { id: spell_id, cooldown } => {
                caster.flags |= TurnFlags::CAST;
                if cooldown > 0 {
                    caster.cooldowns.insert(spell_id.to_owned(), cooldown);
                }
            }
            AttackSource::Custom | AttackSource::Builtin => caster.flags |= TurnFlags::ATTACKED,
        }
    }
    ActionOutcome::Performed
}

/// Hits the first living opponent within `attack.range` tiles, stopping at walls.
fn melee(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    origin: Position,
    direction: Direction,
    attack: &AttackData,
) {
    let Some(team) = state.entity(id).map(|e| e.team) else {
        return;
    };
    for distance in 1..=attack.range.max(1) as i32 {
        let tile = origin.step(direction, distance);
        if state.grid.tile(tile).is_none_or(|t| t.is_wall()) {
            trace!(entity = %id, %tile, "melee stopped by wall");
            return;
        }
        let target = state
            .entities
            .iter()
            .find(|e| e.is_alive() && e.position == tile && e.team.opposes(team))
            .map(|e| e.id);
        if let Some(target) = target {
            apply_damage(state, target, attack.damage, DamageKind::Direct);
            if let Some(status_effect) = attack.status_effect.as_deref() {
                apply_status(state, env, target, status_effect, Some(id));
            }
            return;
        }
    }
}

/// Heals the caster and every ally within `attack.range` (0 means self only).
fn heal_allies(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    origin: Position,
    attack: &AttackData,
) {
    let Some(team) = state.entity(id).map(|e| e.team) else {
        return;
    };
    let allies: Vec<EntityId> = state
        .entities
        .iter()
        .filter(|e| e.is_alive() && e.team == team)
        .filter(|e| e.id == id || within_radius(origin, e.position, attack.range))
        .map(|e| e.id)
        .collect();

    for ally in allies {
        apply_heal(state, ally, attack.heal);
        if let Some(status_effect) = attack.status_effect.as_deref() {
            apply_status(state, env, ally, status_effect, Some(id));
        }
    }
}
