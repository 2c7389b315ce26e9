//! Transient combat objects: projectiles, hazards, and particles.

use std::collections::BTreeSet;

use super::{EntityId, Position, Team};
use crate::env::{AreaSpec, BounceSpec};
use crate::geometry::Direction;

/// What a projectile delivers on hit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectilePayload {
    pub damage: i32,
    pub heal: i32,
    pub status_effect: Option<String>,
    /// Area burst on entity hit or wall impact.
    pub explode: Option<AreaSpec>,
}

impl ProjectilePayload {
    /// Healing payloads seek allies instead of opponents.
    pub fn is_heal(&self) -> bool {
        self.heal > 0 && self.damage <= 0
    }
}

/// A ranged attack in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projectile {
    pub id: u32,
    pub source: EntityId,
    pub team: Team,
    pub origin: Position,
    pub position: Position,
    /// Farthest tile of the current straight segment.
    pub target: Position,
    pub direction: Direction,
    /// Tiles advanced per turn.
    pub speed: u32,
    /// Tiles left before the projectile fizzles.
    pub remaining_range: u32,
    pub payload: ProjectilePayload,
    pub homing_target: Option<EntityId>,
    pub bounce: Option<BounceSpec>,
    pub bounces: u32,
    pub pierce: bool,
    /// Precomputed tiles still to enter, in order.
    pub path: Vec<Position>,
    pub path_index: usize,
    /// Entities already hit, so piercing shots damage each target once.
    pub hit: BTreeSet<EntityId>,
}

impl Projectile {
    pub fn next_path_tile(&self) -> Option<Position> {
        self.path.get(self.path_index).copied()
    }
}

/// Multi-turn damage zone left by an area attack.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistentAreaEffect {
    pub id: u32,
    pub source: EntityId,
    pub team: Team,
    pub center: Position,
    pub radius: u32,
    pub damage_per_turn: i32,
    pub remaining_turns: u32,
}

/// Visual-only marker kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ParticleKind {
    Hit,
    Heal,
    Explosion,
    Impact,
    Teleport,
}

/// Short-lived render hint. Never read by the rules.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Position,
    pub ttl: u32,
}
