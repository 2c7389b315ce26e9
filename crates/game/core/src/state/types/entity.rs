use std::collections::BTreeMap;

use bitflags::bitflags;

use super::{EntityId, Position, StatusEffectInstance, StatusKind, Team};
use crate::action::Action;
use crate::geometry::Direction;

bitflags! {
    /// Transient per-turn markers consumed by renderers; cleared at turn start.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TurnFlags: u16 {
        const MOVED      = 1 << 0;
        const TURNED     = 1 << 1;
        const ATTACKED   = 1 << 2;
        const CAST       = 1 << 3;
        const HIT        = 1 << 4;
        const HEALED     = 1 << 5;
        const DIED       = 1 << 6;
        const TELEPORTED = 1 << 7;
        const SLID       = 1 << 8;
        const BLOCKED    = 1 << 9;
        const SKIPPED    = 1 << 10;
        const SPAWNED    = 1 << 11;
    }
}

/// Contact-combat and collision traits shared by characters and enemies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatProfile {
    /// Damage dealt when colliding with an opponent.
    #[cfg_attr(feature = "serde", serde(alias = "attackDamage", alias = "attack_damage"))]
    pub contact_damage: i32,
    /// Strikes first in a collision.
    #[cfg_attr(feature = "serde", serde(alias = "meleePriority"))]
    pub melee_priority: bool,
    #[cfg_attr(feature = "serde", serde(alias = "blocksMovement"))]
    pub blocks_movement: bool,
    /// Corpse keeps blocking.
    #[cfg_attr(feature = "serde", serde(alias = "blocksMovementDead"))]
    pub blocks_movement_dead: bool,
    /// Movers apply their wall policy instead of fighting.
    #[cfg_attr(feature = "serde", serde(alias = "behavesLikeWall"))]
    pub behaves_like_wall: bool,
    #[cfg_attr(feature = "serde", serde(alias = "behavesLikeWallDead"))]
    pub behaves_like_wall_dead: bool,
    /// Passes through, and is passed through by, other entities.
    #[cfg_attr(feature = "serde", serde(alias = "canGhost"))]
    pub ghost: bool,
}

impl Default for CombatProfile {
    fn default() -> Self {
        Self {
            contact_damage: 0,
            melee_priority: false,
            blocks_movement: true,
            blocks_movement_dead: false,
            behaves_like_wall: false,
            behaves_like_wall_dead: false,
            ghost: false,
        }
    }
}

/// Whether an enemy runs its action program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorKind {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "active"))]
    Active,
    #[cfg_attr(feature = "serde", serde(alias = "static"))]
    Static,
}

/// A character or enemy instance on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub team: Team,
    /// Definition id in the actor oracle.
    pub template_id: String,
    pub position: Position,
    pub facing: Direction,
    pub health: i32,
    pub max_health: i32,
    /// Monotonic: only a spawn effect clears it.
    pub dead: bool,
    pub active: bool,
    /// Not yet on the board (waiting for a pressure plate spawn).
    pub dormant: bool,
    pub behavior: BehaviorKind,
    pub program: Vec<Action>,
    /// Index into `program`, always within `0..=program.len()`.
    pub cursor: usize,
    pub combat: CombatProfile,
    pub statuses: Vec<StatusEffectInstance>,
    pub cooldowns: BTreeMap<String, u32>,
    pub flags: TurnFlags,
    /// Alternates on every movement sub-step while slowed.
    pub slow_phase: bool,
    /// Score granted when this entity dies.
    pub score_value: i32,
    /// Collectible dropped on death.
    pub drops: Option<String>,
}

impl Entity {
    pub fn new(
        id: EntityId,
        team: Team,
        template_id: impl Into<String>,
        position: Position,
        facing: Direction,
        max_health: i32,
    ) -> Self {
        Self {
            id,
            team,
            template_id: template_id.into(),
            position,
            facing,
            health: max_health,
            max_health,
            dead: false,
            active: true,
            dormant: false,
            behavior: BehaviorKind::Active,
            program: Vec::new(),
            cursor: 0,
            combat: CombatProfile::default(),
            statuses: Vec::new(),
            cooldowns: BTreeMap::new(),
            flags: TurnFlags::empty(),
            slow_phase: false,
            score_value: 0,
            drops: None,
        }
    }

    pub fn with_program(mut self, program: Vec<Action>) -> Self {
        self.program = program;
        self
    }

    pub fn with_combat(mut self, combat: CombatProfile) -> Self {
        self.combat = combat;
        self
    }

    /// Alive and on the board.
    pub fn is_alive(&self) -> bool {
        !self.dead && !self.dormant
    }

    /// Present on the board, alive or as a corpse.
    pub fn is_present(&self) -> bool {
        !self.dormant
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses.iter().any(|s| s.kind == kind && s.remaining > 0)
    }

    pub fn is_action_prevented(&self) -> bool {
        self.statuses
            .iter()
            .any(|s| s.kind.prevents_action() && s.remaining > 0)
    }

    /// Whether this entity stops other movers on its tile.
    pub fn blocks_movement(&self) -> bool {
        if !self.is_present() || self.combat.ghost {
            return false;
        }
        if self.dead {
            self.combat.blocks_movement_dead || self.combat.behaves_like_wall_dead
        } else {
            self.combat.blocks_movement || self.combat.behaves_like_wall
        }
    }

    /// Whether movers should apply their wall policy against this entity.
    pub fn behaves_like_wall(&self) -> bool {
        if !self.is_present() || self.combat.ghost {
            return false;
        }
        if self.dead {
            self.combat.behaves_like_wall_dead
        } else {
            self.combat.behaves_like_wall
        }
    }

    pub fn is_below_half_health(&self) -> bool {
        self.health * 2 < self.max_health
    }
}
