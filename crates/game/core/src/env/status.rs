use crate::state::{StackingPolicy, StatusKind};

/// Provides status effect definitions by asset id.
pub trait StatusOracle: Send + Sync {
    fn status_effect(&self, id: &str) -> Option<&StatusEffectAsset>;
}

/// Definition of a buff or debuff.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectAsset {
    pub id: String,
    pub kind: StatusKind,
    /// Per-tick amount for over-time effects, absorb pool for shields.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: i32,
    /// Turns the effect lasts.
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default, alias = "stackingBehavior"))]
    pub stacking: StackingPolicy,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stacks", alias = "maxStacks"))]
    pub max_stacks: u32,
    /// Percent chance (0..=100) that an application lands.
    #[cfg_attr(feature = "serde", serde(default = "default_apply_chance", alias = "applyChance"))]
    pub apply_chance: u8,
    /// Tick at turn start instead of turn end.
    #[cfg_attr(feature = "serde", serde(default, alias = "processAtTurnStart"))]
    pub process_at_turn_start: bool,
    #[cfg_attr(feature = "serde", serde(default, alias = "removedOnDamage"))]
    pub removed_on_damage: bool,
}

#[cfg(feature = "serde")]
fn default_max_stacks() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_apply_chance() -> u8 {
    100
}

impl StatusEffectAsset {
    pub fn new(id: impl Into<String>, kind: StatusKind, value: i32, duration: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            value,
            duration,
            stacking: StackingPolicy::Refresh,
            max_stacks: 1,
            apply_chance: 100,
            process_at_turn_start: false,
            removed_on_damage: kind == StatusKind::Sleep,
        }
    }

    pub fn with_stacking(mut self, stacking: StackingPolicy, max_stacks: u32) -> Self {
        self.stacking = stacking;
        self.max_stacks = max_stacks;
        self
    }

    pub fn with_apply_chance(mut self, percent: u8) -> Self {
        self.apply_chance = percent;
        self
    }

    pub fn at_turn_start(mut self) -> Self {
        self.process_at_turn_start = true;
        self
    }

    pub fn removed_on_damage(mut self) -> Self {
        self.removed_on_damage = true;
        self
    }
}
