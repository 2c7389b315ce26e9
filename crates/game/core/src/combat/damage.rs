//! Health changes: damage with shield absorption, healing, and death.

use tracing::debug;

use crate::state::{
    CollectibleState, EntityId, GameState, ParticleKind, StatusKind, Team, TurnFlags,
};

/// Where damage came from. Only direct damage wakes sleepers and strips
/// removed-on-damage effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageKind {
    /// Attacks, projectiles, contact, tiles, hazards.
    Direct,
    /// Status-effect ticks.
    OverTime,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Health actually removed.
    pub dealt: i32,
    /// Damage soaked by shields.
    pub absorbed: i32,
    pub killed: bool,
}

impl DamageOutcome {
    pub fn landed(&self) -> bool {
        self.dealt > 0 || self.absorbed > 0
    }
}

/// Damages a living entity, routing through its shields first.
///
/// Non-positive amounts and dead or dormant targets are ignored.
pub fn apply_damage(
    state: &mut GameState,
    target: EntityId,
    amount: i32,
    kind: DamageKind,
) -> DamageOutcome {
    let mut outcome = DamageOutcome::default();
    if amount <= 0 {
        return outcome;
    }
    let Some(entity) = state.entity_mut(target) else {
        return outcome;
    };
    if !entity.is_alive() {
        return outcome;
    }

    let mut remaining = amount;
    for shield in entity
        .statuses
        .iter_mut()
        .filter(|s| s.kind == StatusKind::Shield && s.value > 0)
    {
        let soaked = remaining.min(shield.value);
        shield.value -= soaked;
        remaining -= soaked;
        outcome.absorbed += soaked;
        if remaining == 0 {
            break;
        }
    }
    entity
        .statuses
        .retain(|s| s.kind != StatusKind::Shield || s.value > 0);

    entity.health -= remaining;
    outcome.dealt = remaining;
    entity.flags |= TurnFlags::HIT;

    if kind == DamageKind::Direct && outcome.landed() {
        entity
            .statuses
            .retain(|s| s.kind != StatusKind::Sleep && !s.removed_on_damage);
    }

    let position = entity.position;
    let dying = entity.health <= 0;
    state.emit_particle(ParticleKind::Hit, position);

    if dying {
        kill(state, target);
        outcome.killed = true;
    }
    outcome
}

/// Restores health up to the maximum. Returns the amount healed.
pub fn apply_heal(state: &mut GameState, target: EntityId, amount: i32) -> i32 {
    if amount <= 0 {
        return 0;
    }
    let Some(entity) = state.entity_mut(target) else {
        return 0;
    };
    if !entity.is_alive() {
        return 0;
    }

    let healed = amount.min(entity.max_health - entity.health).max(0);
    entity.health += healed;
    entity.flags |= TurnFlags::HEALED;
    let position = entity.position;
    state.emit_particle(ParticleKind::Heal, position);
    healed
}

/// Marks an entity dead, awards its score, and drops its collectible.
///
/// The corpse stays in the arena and keeps its tile.
pub fn kill(state: &mut GameState, target: EntityId) {
    let Some(entity) = state.entity_mut(target) else {
        return;
    };
    if entity.dead {
        return;
    }

    entity.dead = true;
    entity.active = false;
    entity.health = entity.health.min(0);
    entity.flags |= TurnFlags::DIED;

    let team = entity.team;
    let position = entity.position;
    let score = entity.score_value;
    let drop = entity.drops.clone();
    debug!(entity = %target, %position, "entity died");

    if team == Team::Enemy {
        state.score += i64::from(score);
        if let Some(collectible_id) = drop {
            let mut dropped = CollectibleState::new(collectible_id, position);
            dropped.dropped = true;
            state.collectibles.push(dropped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;
    use crate::state::{
        Entity, GameRules, Grid, Position, StackingPolicy, StatusEffectInstance,
    };

    fn state_with(entity: Entity) -> (GameState, EntityId) {
        let mut state = GameState::new(Grid::new(3, 3), GameRules::default(), 1);
        let id = state.entities.spawn(entity);
        (state, id)
    }

    fn status(kind: StatusKind, value: i32) -> StatusEffectInstance {
        StatusEffectInstance {
            asset_id: kind.to_string(),
            kind,
            value,
            remaining: 3,
            stacks: 1,
            max_stacks: 1,
            stacking: StackingPolicy::Refresh,
            source: None,
            process_at_turn_start: false,
            removed_on_damage: kind == StatusKind::Sleep,
            applied_turn: 0,
        }
    }

    fn goblin() -> Entity {
        Entity::new(EntityId(0), Team::Enemy, "goblin", Position::new(1, 1), Direction::North, 5)
    }

    #[test]
    fn shield_absorbs_before_health() {
        let mut target = goblin();
        target.statuses.push(status(StatusKind::Shield, 3));
        let (mut state, id) = state_with(target);

        let hit = apply_damage(&mut state, id, 2, DamageKind::Direct);
        assert_eq!((hit.absorbed, hit.dealt), (2, 0));
        assert_eq!(state.entity(id).map(|e| e.health), Some(5));

        let hit = apply_damage(&mut state, id, 4, DamageKind::Direct);
        assert_eq!((hit.absorbed, hit.dealt), (1, 3));
        let entity = state.entity(id).expect("entity");
        assert_eq!(entity.health, 2);
        assert!(!entity.has_status(StatusKind::Shield));
    }

    #[test]
    fn direct_damage_wakes_but_ticks_do_not() {
        let mut target = goblin();
        target.statuses.push(status(StatusKind::Sleep, 0));
        let (mut state, id) = state_with(target);

        apply_damage(&mut state, id, 1, DamageKind::OverTime);
        assert!(state.entity(id).expect("entity").has_status(StatusKind::Sleep));

        apply_damage(&mut state, id, 1, DamageKind::Direct);
        assert!(!state.entity(id).expect("entity").has_status(StatusKind::Sleep));
    }

    #[test]
    fn lethal_damage_scores_and_drops() {
        let mut target = goblin();
        target.score_value = 25;
        target.drops = Some("key".into());
        let (mut state, id) = state_with(target);

        let hit = apply_damage(&mut state, id, 9, DamageKind::Direct);
        assert!(hit.killed);
        let entity = state.entity(id).expect("entity");
        assert!(entity.dead && !entity.active);
        assert_eq!(state.score, 25);
        assert_eq!(state.collectibles.len(), 1);
        assert!(state.collectibles[0].dropped);

        // Corpses take no further damage and never die twice.
        let again = apply_damage(&mut state, id, 9, DamageKind::Direct);
        assert_eq!(again, DamageOutcome::default());
        assert_eq!(state.score, 25);
    }

    #[test]
    fn healing_caps_at_max() {
        let mut target = goblin();
        target.health = 3;
        let (mut state, id) = state_with(target);
        assert_eq!(apply_heal(&mut state, id, 10), 2);
        assert_eq!(state.entity(id).map(|e| e.health), Some(5));
    }
}
