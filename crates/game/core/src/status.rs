//! Status-effect processor: application with stacking, and per-turn ticking.
//!
//! Gating effects (stun, sleep, slow, haste) are read by the scheduler and the
//! movement code when the entity acts; this module only owns their lifetime.
//! Over-time effects tick at turn end unless their definition asks for turn
//! start. An instance never ticks or counts down on the turn it landed.

use tracing::{debug, warn};

use crate::combat::{DamageKind, apply_damage, apply_heal};
use crate::env::{GameEnv, StatusEffectAsset};
use crate::state::{EntityId, GameState, StackingPolicy, StatusEffectInstance};

/// Roll context for apply-chance seeds.
const APPLY_ROLL: u32 = 0x5747;

/// What happened when an effect was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StatusApplication {
    /// New instance appended.
    Added,
    /// Existing instance gained a stack.
    Stacked,
    /// Existing instance had its duration reset.
    Refreshed,
    /// Existing instance swapped for a fresh one.
    Replaced,
    /// Existing instance was stronger and stays as is.
    Kept,
    /// The apply-chance roll failed.
    Resisted,
    /// Unknown asset or no living target.
    Ignored,
}

/// Applies the status effect asset `asset_id` to `target`.
pub fn apply_status(
    state: &mut GameState,
    env: &GameEnv<'_>,
    target: EntityId,
    asset_id: &str,
    source: Option<EntityId>,
) -> StatusApplication {
    let Some(asset) = env.status_effect(asset_id) else {
        warn!(asset_id, "status effect asset not found");
        return StatusApplication::Ignored;
    };
    if !state.entity(target).is_some_and(|e| e.is_alive()) {
        return StatusApplication::Ignored;
    }

    if asset.apply_chance < 100 {
        let seed = state.next_roll_seed(target, APPLY_ROLL);
        if !env.roller().chance(seed, asset.apply_chance) {
            debug!(entity = %target, asset_id, "status effect resisted");
            return StatusApplication::Resisted;
        }
    }

    let turn = state.turn;
    let Some(entity) = state.entity_mut(target) else {
        return StatusApplication::Ignored;
    };
    let incoming = instantiate(asset, source, turn);

    let existing = entity
        .statuses
        .iter()
        .position(|s| s.asset_id == asset.id)
        .or_else(|| entity.statuses.iter().position(|s| s.kind == asset.kind));
    let Some(index) = existing else {
        entity.statuses.push(incoming);
        return StatusApplication::Added;
    };

    let current = &mut entity.statuses[index];
    match asset.stacking {
        StackingPolicy::Refresh => {
            current.remaining = asset.duration;
            current.applied_turn = turn;
            StatusApplication::Refreshed
        }
        StackingPolicy::Stack => {
            current.remaining = asset.duration;
            current.applied_turn = turn;
            current.max_stacks = asset.max_stacks.max(1);
            if current.stacks < current.max_stacks {
                current.stacks += 1;
                StatusApplication::Stacked
            } else {
                StatusApplication::Refreshed
            }
        }
        StackingPolicy::KeepHighest => {
            if incoming.value > current.value {
                *current = incoming;
                StatusApplication::Replaced
            } else {
                StatusApplication::Kept
            }
        }
        StackingPolicy::Replace => {
            *current = incoming;
            StatusApplication::Replaced
        }
    }
}

fn instantiate(asset: &StatusEffectAsset, source: Option<EntityId>, turn: u32) -> StatusEffectInstance {
    StatusEffectInstance {
        asset_id: asset.id.clone(),
        kind: asset.kind,
        value: asset.value,
        remaining: asset.duration,
        stacks: 1,
        max_stacks: asset.max_stacks.max(1),
        stacking: asset.stacking,
        source,
        process_at_turn_start: asset.process_at_turn_start,
        removed_on_damage: asset.removed_on_damage,
        applied_turn: turn,
    }
}

/// Ticks every effect flagged for turn-start processing.
pub fn tick_turn_start(state: &mut GameState) {
    for id in state.entities.ids() {
        tick_entity(state, id, true);
    }
}

/// Ticks the remaining effects, then counts spell cooldowns down.
pub fn tick_turn_end(state: &mut GameState) {
    for id in state.entities.ids() {
        tick_entity(state, id, false);
    }
    decrement_cooldowns(state);
}

fn tick_entity(state: &mut GameState, id: EntityId, at_turn_start: bool) {
    let turn = state.turn;
    let Some(entity) = state.entity_mut(id) else {
        return;
    };
    if !entity.is_alive() {
        return;
    }

    let mut deltas = Vec::new();
    for status in entity
        .statuses
        .iter_mut()
        .filter(|s| s.process_at_turn_start == at_turn_start && s.applied_turn < turn)
    {
        if status.remaining == 0 {
            continue;
        }
        deltas.push(status.tick_amount());
        status.remaining -= 1;
    }
    entity.statuses.retain(|s| !s.is_expired());

    for delta in deltas {
        if delta < 0 {
            apply_damage(state, id, -delta, DamageKind::OverTime);
        } else if delta > 0 {
            apply_heal(state, id, delta);
        }
    }
}

fn decrement_cooldowns(state: &mut GameState) {
    for entity in state.entities.iter_mut() {
        for remaining in entity.cooldowns.values_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        entity.cooldowns.retain(|_, remaining| *remaining > 0);
    }
}
