//! Observable, render-facing view of a [`GameState`].
//!
//! The shape here is the contract renderers consume; internal bookkeeping
//! (cursors, ledgers, seeds) is deliberately absent.

use super::{
    EntityId, GameState, GameStatus, Particle, PersistentAreaEffect, Position, Projectile, Team,
};
use crate::geometry::Direction;

/// Per-entity slice of the observable state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub team: Team,
    pub template_id: String,
    pub position: Position,
    pub facing: Direction,
    pub health: i32,
    pub dead: bool,
}

/// Stable snapshot consumed by renderers and tools.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateSnapshot {
    pub turn: u32,
    pub status: GameStatus,
    pub score: i64,
    pub entities: Vec<EntitySnapshot>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub area_effects: Vec<PersistentAreaEffect>,
}

impl StateSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let entities = state
            .entities
            .iter()
            .filter(|e| e.is_present())
            .map(|e| EntitySnapshot {
                id: e.id,
                team: e.team,
                template_id: e.template_id.clone(),
                position: e.position,
                facing: e.facing,
                health: e.health,
                dead: e.dead,
            })
            .collect();

        Self {
            turn: state.turn,
            status: state.status,
            score: state.score,
            entities,
            projectiles: state.projectiles.clone(),
            particles: state.particles.clone(),
            area_effects: state.area_effects.clone(),
        }
    }
}
