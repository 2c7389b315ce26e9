//! Area effects: instant bursts and lingering hazards.

use tracing::trace;

use crate::combat::{DamageKind, apply_damage, apply_heal};
use crate::env::{AreaAffects, AreaSpec, GameEnv};
use crate::geometry::within_radius;
use crate::state::{EntityId, GameState, ParticleKind, PersistentAreaEffect, Position, Team};
use crate::status::apply_status;

/// What a burst delivers to each entity it touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AreaPayload<'p> {
    pub damage: i32,
    pub heal: i32,
    pub status_effect: Option<&'p str>,
}

fn affects(team: Team, other: Team, affects: AreaAffects) -> bool {
    match affects {
        AreaAffects::Opponents => team.opposes(other),
        AreaAffects::Allies => team == other,
        AreaAffects::All => true,
    }
}

/// Resolves an area attack centered on `center`.
///
/// Instant areas hit every matching living entity within the Euclidean radius,
/// in arena order; the source never damages itself. A persistent spec also
/// leaves a hazard that damages opponents each turn.
pub fn burst(
    state: &mut GameState,
    env: &GameEnv<'_>,
    source: EntityId,
    team: Team,
    center: Position,
    spec: &AreaSpec,
    payload: AreaPayload<'_>,
) {
    if spec.instant {
        let targets: Vec<EntityId> = state
            .entities
            .iter()
            .filter(|e| e.is_alive())
            .filter(|e| affects(team, e.team, spec.affects))
            .filter(|e| within_radius(center, e.position, spec.radius))
            .map(|e| e.id)
            .collect();

        for target in targets {
            if payload.damage > 0 && target != source {
                apply_damage(state, target, payload.damage, DamageKind::Direct);
            }
            if payload.heal > 0 {
                apply_heal(state, target, payload.heal);
            }
            if let Some(status_effect) = payload.status_effect {
                if target != source || payload.damage <= 0 {
                    apply_status(state, env, target, status_effect, Some(source));
                }
            }
        }
        state.emit_particle(ParticleKind::Explosion, center);
    }

    if let Some(persistent) = spec.persistent {
        if persistent.turns > 0 {
            let id = state.next_object_id();
            trace!(id, %center, radius = spec.radius, "persistent area spawned");
            state.area_effects.push(PersistentAreaEffect {
                id,
                source,
                team,
                center,
                radius: spec.radius,
                damage_per_turn: persistent.damage_per_turn,
                remaining_turns: persistent.turns,
            });
        }
    }
}

/// Damages opponents inside every hazard, then counts hazards down.
pub fn tick_area_effects(state: &mut GameState) {
    let effects = state.area_effects.clone();
    for effect in &effects {
        let targets: Vec<EntityId> = state
            .entities
            .iter()
            .filter(|e| e.is_alive() && effect.team.opposes(e.team))
            .filter(|e| within_radius(effect.center, e.position, effect.radius))
            .map(|e| e.id)
            .collect();
        for target in targets {
            apply_damage(state, target, effect.damage_per_turn, DamageKind::Direct);
        }
    }

    for effect in &mut state.area_effects {
        effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
    }
    state.area_effects.retain(|e| e.remaining_turns > 0);
}
