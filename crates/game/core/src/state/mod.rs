//! Authoritative simulation state.
//!
//! [`GameState`] is the single mutable aggregate of a run. During a turn it has
//! exactly one owner (the engine), and every handler receives it explicitly;
//! nothing holds a reference past its call. The oracle clones a fresh state for
//! each attempt and throws it away afterwards.
mod snapshot;
pub mod types;

use std::collections::{BTreeMap, BTreeSet};

pub use snapshot::{EntitySnapshot, StateSnapshot};
pub use types::{
    BehaviorKind, Cadence, CollectibleState, CombatProfile, Entity, EntityId, Grid, Particle,
    ParticleKind, PersistentAreaEffect, Position, Projectile, ProjectilePayload, StackingPolicy,
    StatusEffectInstance, StatusKind, Team, Tile, TileKind, TurnFlags,
};

use crate::config::SimulationConfig;
use crate::env::compute_seed;
use crate::puzzle::WinCondition;

/// Lifecycle of a run. Terminal once it leaves `Running`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Setup,
    Running,
    Victory,
    Defeat,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Victory | GameStatus::Defeat)
    }
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EndReason {
    AllConditionsMet,
    TurnLimitReached,
    WinWindowMissed,
    AllCharactersDead,
    KeepAliveViolated,
}

/// Arena of every entity in the run, indexed by [`EntityId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    entities: Vec<Entity>,
}

impl EntitiesState {
    /// Appends an entity, assigning it the next id.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        entity.id = id;
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.iter_mut()
    }

    /// All ids in arena order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn team_ids(&self, team: Team) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.team == team)
            .map(|e| e.id)
            .collect()
    }

    pub fn characters(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(|e| e.team == Team::Character)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(|e| e.team == Team::Enemy)
    }

    /// First living entity standing on `position`, excluding `except`.
    pub fn living_at(&self, position: Position, except: Option<EntityId>) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.is_alive() && e.position == position && Some(e.id) != except)
    }

    /// First present entity (alive or corpse) on `position` that blocks movement.
    pub fn blocker_at(&self, position: Position, except: EntityId) -> Option<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.id != except && e.position == position && e.blocks_movement())
            // Living blockers take precedence over corpses on the same tile.
            .min_by_key(|e| (e.dead, e.id))
    }

    pub fn living_count(&self, team: Team) -> usize {
        self.entities
            .iter()
            .filter(|e| e.team == team && e.is_alive())
            .count()
    }
}

/// Per-tile runtime flags layered over the static grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRuntime {
    /// One-shot damage tiles that already hurt a given entity.
    pub damaged_once: BTreeSet<(Position, EntityId)>,
}

/// Puzzle rules the scheduler evaluates each turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRules {
    pub win_conditions: Vec<WinCondition>,
    pub max_turns: u32,
    pub placed_characters: u32,
}

/// Same-turn movement bookkeeping for train moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementLedger {
    /// Entities whose pending action this phase is a move.
    pub vacating: BTreeSet<EntityId>,
    /// Movers that entered a vacating ally's tile, with the tile they left.
    pub overlaps: Vec<(EntityId, Position)>,
}

/// Canonical state of one simulation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Base seed for every random roll in the run. Never modified.
    pub game_seed: u64,
    /// Roll counter mixed into each seed.
    pub rng_nonce: u64,
    pub turn: u32,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub score: i64,
    pub grid: Grid,
    pub entities: EntitiesState,
    pub collectibles: Vec<CollectibleState>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub area_effects: Vec<PersistentAreaEffect>,
    pub tile_runtime: TileRuntime,
    /// Enemy positions captured before enemies move this turn.
    pub pre_move_positions: BTreeMap<EntityId, Position>,
    pub rules: GameRules,
    pub movement: MovementLedger,
    next_object_id: u32,
}

impl GameState {
    /// Creates an empty state on `grid` in the `Setup` phase.
    pub fn new(grid: Grid, rules: GameRules, game_seed: u64) -> Self {
        Self {
            game_seed,
            grid,
            rules,
            ..Self::default()
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Allocates an id for a projectile or area effect.
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_object_id;
        self.next_object_id += 1;
        id
    }

    /// Derives a fresh deterministic seed for one random roll.
    pub fn next_roll_seed(&mut self, entity: EntityId, context: u32) -> u64 {
        let seed = compute_seed(self.game_seed, self.rng_nonce, entity.0, context);
        self.rng_nonce += 1;
        seed
    }

    /// Queues a render particle at `position`.
    pub fn emit_particle(&mut self, kind: ParticleKind, position: Position) {
        self.particles.push(Particle {
            kind,
            position,
            ttl: SimulationConfig::PARTICLE_TTL,
        });
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Whether `position` can hold an entity at all (in bounds, not void, not wall).
    pub fn is_standable(&self, position: Position) -> bool {
        self.grid.tile(position).is_some_and(|t| !t.is_wall())
    }

    /// Observable snapshot for renderers.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from_state(self)
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two runs with identical inputs must produce identical fingerprints.
    #[cfg(feature = "serde")]
    pub fn fingerprint(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;

    fn entity(team: Team, x: i32, y: i32) -> Entity {
        Entity::new(EntityId(0), team, "test", Position::new(x, y), Direction::North, 3)
    }

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut entities = EntitiesState::default();
        let a = entities.spawn(entity(Team::Character, 0, 0));
        let b = entities.spawn(entity(Team::Enemy, 1, 0));
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(entities.get(b).map(|e| e.team), Some(Team::Enemy));
    }

    #[test]
    fn living_blockers_win_over_corpses() {
        let mut entities = EntitiesState::default();
        let mut corpse = entity(Team::Enemy, 1, 1);
        corpse.dead = true;
        corpse.combat.blocks_movement_dead = true;
        entities.spawn(corpse);
        let living = entities.spawn(entity(Team::Enemy, 1, 1));
        let mover = entities.spawn(entity(Team::Character, 0, 1));

        let blocker = entities.blocker_at(Position::new(1, 1), mover);
        assert_eq!(blocker.map(|e| e.id), Some(living));
    }

    #[test]
    fn roll_seeds_never_repeat() {
        let mut state = GameState::new(Grid::new(2, 2), GameRules::default(), 7);
        let first = state.next_roll_seed(EntityId(0), 0);
        let second = state.next_roll_seed(EntityId(0), 0);
        assert_ne!(first, second);
        assert_eq!(state.rng_nonce, 2);
    }
}
