//! Action domain: program steps and the executor that runs them.
//!
//! # Module Structure
//!
//! - `types`: action variants, execution modes, triggers, wall policies, targeting
//! - `movement`: look-ahead movement, contact combat, train moves, pickups
//! - `tiles`: custom tile behaviors fired on entering a tile
//! - `attack`: direction resolution and melee/projectile/area/heal dispatch
//!
//! [`execute`] never fails. Missing assets, impossible moves, and absent
//! targets are logged and turn into [`ActionOutcome::NoOp`].

pub mod attack;
pub mod movement;
mod tiles;
pub mod types;

pub use attack::{Aim, Aims, approximate_direction, nearest_opponents, resolve_aims};
pub use movement::{StepOutcome, is_wall_like, settle_overlaps, wall_ahead};
pub use types::{
    Action, ActionKind, AutoTarget, EventTrigger, ExecutionMode, TargetFilter, Targeting,
    WallPolicy,
};

use tracing::trace;

use crate::env::GameEnv;
use crate::state::{EntityId, GameState, TurnFlags};

/// Whether an action changed anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ActionOutcome {
    Performed,
    NoOp,
}

/// Runs one action for `actor` against the shared state.
///
/// The caller owns gating (stun, sleep, activity) and cursor bookkeeping;
/// `Repeat` is a cursor instruction and does nothing here.
pub fn execute(
    state: &mut GameState,
    env: &GameEnv<'_>,
    actor: EntityId,
    kind: &ActionKind,
) -> ActionOutcome {
    if !state.entity(actor).is_some_and(|e| e.is_alive()) {
        return ActionOutcome::NoOp;
    }
    trace!(entity = %actor, ?kind, turn = state.turn, "executing action");

    match kind {
        ActionKind::Move {
            tiles,
            on_wall,
            relative,
        } => movement::execute_move(state, env, actor, *tiles, *on_wall, *relative),
        ActionKind::Turn { side, angle } => {
            let Some(entity) = state.entity_mut(actor) else {
                return ActionOutcome::NoOp;
            };
            entity.facing = entity.facing.turn(*side, *angle);
            entity.flags |= TurnFlags::TURNED;
            ActionOutcome::Performed
        }
        ActionKind::AttackForward { damage } => attack::strike_forward(state, env, actor, *damage),
        ActionKind::AttackRange {
            damage,
            range,
            speed,
        } => attack::fire_forward(state, env, actor, *damage, *range, *speed),
        ActionKind::CustomAttack {
            attack_id,
            targeting,
        } => attack::custom_attack(state, env, actor, attack_id, targeting),
        ActionKind::SpellCast {
            spell_id,
            targeting,
        } => attack::cast_spell(state, env, actor, spell_id, targeting),
        ActionKind::Wait => ActionOutcome::Performed,
        ActionKind::IfWall { then, otherwise } => {
            if wall_ahead(state, actor) {
                execute(state, env, actor, then)
            } else if let Some(otherwise) = otherwise {
                execute(state, env, actor, otherwise)
            } else {
                ActionOutcome::NoOp
            }
        }
        ActionKind::Repeat => ActionOutcome::NoOp,
    }
}
