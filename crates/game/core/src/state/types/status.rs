//! Status effect instances carried by entities.
//!
//! Definitions live in the status oracle; an instance copies the fields it
//! needs so ticking never has to consult the oracle again.

use super::EntityId;

/// Behavioral category of a status effect.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    // ========================================================================
    // Damage / heal over time
    // ========================================================================
    #[cfg_attr(feature = "serde", serde(alias = "poison"))]
    Poison,
    #[cfg_attr(feature = "serde", serde(alias = "burn"))]
    Burn,
    #[cfg_attr(feature = "serde", serde(alias = "bleed"))]
    Bleed,
    #[cfg_attr(feature = "serde", serde(alias = "regen"))]
    Regen,

    // ========================================================================
    // Action gating
    // ========================================================================
    /// Skips the entity's action entirely.
    #[cfg_attr(feature = "serde", serde(alias = "stun"))]
    Stun,
    /// Like stun, but broken by direct damage.
    #[cfg_attr(feature = "serde", serde(alias = "sleep"))]
    Sleep,
    /// Skips every other movement sub-step.
    #[cfg_attr(feature = "serde", serde(alias = "slow"))]
    Slow,
    /// One bonus movement sub-step.
    #[cfg_attr(feature = "serde", serde(alias = "haste"))]
    Haste,

    // ========================================================================
    // Defensive
    // ========================================================================
    /// Absorbs up to `value` damage before health is touched.
    #[cfg_attr(feature = "serde", serde(alias = "shield"))]
    Shield,
}

impl StatusKind {
    /// Per-stack health delta applied on each tick (negative = damage).
    pub fn tick_sign(self) -> i32 {
        match self {
            StatusKind::Poison | StatusKind::Burn | StatusKind::Bleed => -1,
            StatusKind::Regen => 1,
            _ => 0,
        }
    }

    pub fn prevents_action(self) -> bool {
        matches!(self, StatusKind::Stun | StatusKind::Sleep)
    }
}

/// How a re-application of an already present effect is merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StackingPolicy {
    /// Reset the remaining duration.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "refresh"))]
    Refresh,
    /// Add a stack up to the cap and refresh the duration.
    #[cfg_attr(feature = "serde", serde(alias = "stack"))]
    Stack,
    /// Keep whichever instance has the higher value.
    #[cfg_attr(feature = "serde", serde(alias = "keep_highest", alias = "keepHighest"))]
    KeepHighest,
    /// Discard the old instance entirely.
    #[cfg_attr(feature = "serde", serde(alias = "replace"))]
    Replace,
}

/// A live status effect on an entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectInstance {
    /// Id of the status effect asset this instance came from.
    pub asset_id: String,
    pub kind: StatusKind,
    pub value: i32,
    pub remaining: u32,
    pub stacks: u32,
    pub max_stacks: u32,
    pub stacking: StackingPolicy,
    pub source: Option<EntityId>,
    pub process_at_turn_start: bool,
    pub removed_on_damage: bool,
    /// Turn the instance landed (or was last refreshed). It neither ticks nor
    /// counts down until the following turn.
    pub applied_turn: u32,
}

impl StatusEffectInstance {
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Health delta produced by one tick of this effect.
    pub fn tick_amount(&self) -> i32 {
        self.kind.tick_sign() * self.value * self.stacks.max(1) as i32
    }
}
