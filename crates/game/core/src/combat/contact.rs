//! Collision combat between a mover and the opponent occupying its target tile.

use tracing::trace;

use super::damage::{DamageKind, DamageOutcome, apply_damage};
use crate::state::{EntityId, GameState, TurnFlags};

/// Result of one collision exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactOutcome {
    /// Entity that struck first.
    pub first: EntityId,
    pub opening: DamageOutcome,
    /// Counter-attack, present only if the first target survived.
    pub counter: Option<DamageOutcome>,
}

impl ContactOutcome {
    /// Whether the entity occupying the tile died in the exchange.
    pub fn occupant_died(&self, occupant: EntityId) -> bool {
        if self.first == occupant {
            false
        } else {
            self.opening.killed
        }
    }
}

/// Resolves contact damage between `mover` and `occupant`.
///
/// The side with melee priority strikes first; on a tie (both or neither)
/// the mover does. The other side hits back only if it survived.
pub fn resolve_contact(state: &mut GameState, mover: EntityId, occupant: EntityId) -> ContactOutcome {
    let priority = |state: &GameState, id: EntityId| {
        state.entity(id).is_some_and(|e| e.combat.melee_priority)
    };
    let damage = |state: &GameState, id: EntityId| {
        state.entity(id).map_or(0, |e| e.combat.contact_damage)
    };

    let (first, second) = if priority(state, occupant) && !priority(state, mover) {
        (occupant, mover)
    } else {
        (mover, occupant)
    };

    let opening = apply_damage(state, second, damage(state, first), DamageKind::Direct);
    mark_attacked(state, first);

    let second_alive = state.entity(second).is_some_and(|e| e.is_alive());
    let counter = second_alive.then(|| {
        let counter = apply_damage(state, first, damage(state, second), DamageKind::Direct);
        mark_attacked(state, second);
        counter
    });

    trace!(%first, %second, ?opening, ?counter, "contact combat");
    ContactOutcome {
        first,
        opening,
        counter,
    }
}

fn mark_attacked(state: &mut GameState, id: EntityId) {
    if let Some(entity) = state.entity_mut(id) {
        entity.flags |= TurnFlags::ATTACKED;
    }
}
