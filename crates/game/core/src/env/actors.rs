//! Character and enemy definitions and their oracle interface.
//!
//! Definitions are immutable templates; placing one on the board copies its
//! program and combat profile into a fresh [`crate::state::Entity`].

use crate::action::Action;
use crate::geometry::Direction;
use crate::state::{BehaviorKind, CombatProfile};

/// Provides character and enemy templates by definition id.
pub trait ActorOracle: Send + Sync {
    fn character(&self, id: &str) -> Option<&CharacterDefinition>;
    fn enemy(&self, id: &str) -> Option<&EnemyDefinition>;
}

/// A placeable, player-controlled unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(alias = "maxHealth", alias = "health"))]
    pub max_health: i32,
    /// Facing used for every oracle placement; facings are never searched.
    #[cfg_attr(feature = "serde", serde(default, alias = "defaultFacing"))]
    pub default_facing: Direction,
    /// The action program.
    #[cfg_attr(feature = "serde", serde(default, alias = "behavior"))]
    pub program: Vec<Action>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combat: CombatProfile,
}

impl CharacterDefinition {
    pub fn new(id: impl Into<String>, max_health: i32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            max_health,
            default_facing: Direction::default(),
            program: Vec::new(),
            combat: CombatProfile::default(),
        }
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.default_facing = facing;
        self
    }

    pub fn with_program(mut self, program: Vec<Action>) -> Self {
        self.program = program;
        self
    }

    pub fn with_combat(mut self, combat: CombatProfile) -> Self {
        self.combat = combat;
        self
    }
}

/// An opposing unit placed by the puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(alias = "maxHealth", alias = "health"))]
    pub max_health: i32,
    #[cfg_attr(feature = "serde", serde(default, alias = "defaultFacing"))]
    pub default_facing: Direction,
    /// Static enemies never run their program.
    #[cfg_attr(feature = "serde", serde(default, alias = "behaviorType"))]
    pub behavior: BehaviorKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub program: Vec<Action>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combat: CombatProfile,
    /// Score granted on death.
    #[cfg_attr(feature = "serde", serde(default))]
    pub score: i32,
    /// Collectible id dropped on death.
    #[cfg_attr(feature = "serde", serde(default, alias = "dropsCollectible"))]
    pub drops: Option<String>,
}

impl EnemyDefinition {
    pub fn new(id: impl Into<String>, max_health: i32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            max_health,
            default_facing: Direction::default(),
            behavior: BehaviorKind::Static,
            program: Vec::new(),
            combat: CombatProfile::default(),
            score: 0,
            drops: None,
        }
    }

    /// Makes the enemy run `program` every turn.
    pub fn with_program(mut self, program: Vec<Action>) -> Self {
        self.behavior = BehaviorKind::Active;
        self.program = program;
        self
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.default_facing = facing;
        self
    }

    pub fn with_combat(mut self, combat: CombatProfile) -> Self {
        self.combat = combat;
        self
    }

    pub fn with_score(mut self, score: i32) -> Self {
        self.score = score;
        self
    }

    pub fn with_drops(mut self, collectible: impl Into<String>) -> Self {
        self.drops = Some(collectible.into());
        self
    }
}
