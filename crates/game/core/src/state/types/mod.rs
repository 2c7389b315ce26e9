mod collectible;
mod common;
mod entity;
mod grid;
mod projectile;
mod status;

pub use collectible::CollectibleState;
pub use common::{EntityId, Position, Team};
pub use entity::{BehaviorKind, CombatProfile, Entity, TurnFlags};
pub use grid::{Cadence, Grid, Tile, TileKind};
pub use projectile::{
    Particle, ParticleKind, PersistentAreaEffect, Projectile, ProjectilePayload,
};
pub use status::{StackingPolicy, StatusEffectInstance, StatusKind};
