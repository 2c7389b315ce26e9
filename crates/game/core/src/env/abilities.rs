//! Spell and custom-attack assets.
//!
//! Both asset kinds reduce to one [`AttackData`] record, so the executor
//! dispatches melee, projectile, area, and heal patterns from a single place
//! regardless of where the attack was defined.

use crate::geometry::{Direction, RelativeDirection, TurnAngle};

/// Provides spells and custom attacks by asset id.
pub trait AbilityOracle: Send + Sync {
    fn spell(&self, id: &str) -> Option<&SpellAsset>;
    fn custom_attack(&self, id: &str) -> Option<&CustomAttackAsset>;
}

// ============================================================================
// Attack Data
// ============================================================================

/// How an attack reaches its targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackPattern {
    /// Hits the first opponent within `range` tiles along the direction.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "melee"))]
    Melee,
    #[cfg_attr(feature = "serde", serde(alias = "projectile", alias = "ranged"))]
    Projectile,
    #[cfg_attr(feature = "serde", serde(alias = "aoe", alias = "Area"))]
    Aoe,
    /// Restores health to the caster and allies within `range`.
    #[cfg_attr(feature = "serde", serde(alias = "heal"))]
    Heal,
}

/// Redirection rule applied when a projectile strikes a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BouncePolicy {
    /// Mirror the blocked axis (diagonals keep the free axis).
    #[cfg_attr(feature = "serde", serde(alias = "reflect"))]
    Reflect,
    #[cfg_attr(feature = "serde", serde(alias = "reverse"))]
    Reverse,
    #[cfg_attr(feature = "serde", serde(alias = "turn_left"))]
    TurnLeft(TurnAngle),
    #[cfg_attr(feature = "serde", serde(alias = "turn_right"))]
    TurnRight(TurnAngle),
    /// Any direction whose first tile is open, chosen by the seeded RNG.
    #[cfg_attr(feature = "serde", serde(alias = "random"))]
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BounceSpec {
    pub policy: BouncePolicy,
    #[cfg_attr(feature = "serde", serde(alias = "maxBounces"))]
    pub max_bounces: u32,
}

/// Projectile flight parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectileSpec {
    /// Tiles per turn.
    pub speed: u32,
    pub homing: bool,
    pub pierce: bool,
    pub bounce: Option<BounceSpec>,
    /// Area burst on hit or wall impact.
    #[cfg_attr(feature = "serde", serde(alias = "explodeOnImpact"))]
    pub explode: Option<AreaSpec>,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            speed: 1,
            homing: false,
            pierce: false,
            bounce: None,
            explode: None,
        }
    }
}

/// Where an area attack is centered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaCenter {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "caster", alias = "self"))]
    Caster,
    /// The tile `range` steps away along the attack direction.
    #[cfg_attr(feature = "serde", serde(alias = "target", alias = "at_range"))]
    AtRange,
}

/// Which side an area attack touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaAffects {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "enemies", alias = "opponents"))]
    Opponents,
    #[cfg_attr(feature = "serde", serde(alias = "allies"))]
    Allies,
    #[cfg_attr(feature = "serde", serde(alias = "all"))]
    All,
}

/// Lingering hazard spawned by an area attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistentSpec {
    #[cfg_attr(feature = "serde", serde(alias = "damagePerTurn"))]
    pub damage_per_turn: i32,
    pub turns: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AreaSpec {
    pub radius: u32,
    pub center: AreaCenter,
    pub affects: AreaAffects,
    /// Apply damage/heal immediately. `false` with a persistent spec leaves only the hazard.
    pub instant: bool,
    pub persistent: Option<PersistentSpec>,
}

impl Default for AreaSpec {
    fn default() -> Self {
        Self {
            radius: 1,
            center: AreaCenter::Caster,
            affects: AreaAffects::Opponents,
            instant: true,
            persistent: None,
        }
    }
}

/// Unified attack record built from either a spell or a custom attack.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackData {
    pub pattern: AttackPattern,
    pub damage: i32,
    pub heal: i32,
    pub range: u32,
    pub projectile: ProjectileSpec,
    pub area: Option<AreaSpec>,
    #[cfg_attr(feature = "serde", serde(alias = "statusEffect"))]
    pub status_effect: Option<String>,
}

impl Default for AttackData {
    fn default() -> Self {
        Self {
            pattern: AttackPattern::Melee,
            damage: 0,
            heal: 0,
            range: 1,
            projectile: ProjectileSpec::default(),
            area: None,
            status_effect: None,
        }
    }
}

impl AttackData {
    pub fn melee(damage: i32) -> Self {
        Self {
            damage,
            ..Self::default()
        }
    }

    pub fn projectile(damage: i32, range: u32, spec: ProjectileSpec) -> Self {
        Self {
            pattern: AttackPattern::Projectile,
            damage,
            range,
            projectile: spec,
            ..Self::default()
        }
    }

    pub fn area(damage: i32, spec: AreaSpec) -> Self {
        Self {
            pattern: AttackPattern::Aoe,
            damage,
            area: Some(spec),
            ..Self::default()
        }
    }

    pub fn heal(amount: i32, range: u32) -> Self {
        Self {
            pattern: AttackPattern::Heal,
            heal: amount,
            range,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status_effect: impl Into<String>) -> Self {
        self.status_effect = Some(status_effect.into());
        self
    }
}

// ============================================================================
// Assets
// ============================================================================

/// Which directions a spell fires in when no override applies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionMode {
    #[cfg_attr(feature = "serde", serde(alias = "fixed"))]
    Fixed(Vec<Direction>),
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "current_facing", alias = "facing"))]
    CurrentFacing,
    #[cfg_attr(feature = "serde", serde(alias = "all", alias = "all_directions"))]
    All,
    #[cfg_attr(feature = "serde", serde(alias = "relative"))]
    Relative(Vec<RelativeDirection>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellAsset {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub attack: AttackData,
    #[cfg_attr(feature = "serde", serde(default, alias = "directionMode"))]
    pub directions: DirectionMode,
    /// Turns before the spell can be cast again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
}

impl SpellAsset {
    pub fn new(id: impl Into<String>, attack: AttackData) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            attack,
            directions: DirectionMode::CurrentFacing,
            cooldown: 0,
        }
    }

    pub fn with_directions(mut self, directions: DirectionMode) -> Self {
        self.directions = directions;
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomAttackAsset {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub attack: AttackData,
}

impl CustomAttackAsset {
    pub fn new(id: impl Into<String>, attack: AttackData) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            attack,
        }
    }
}
