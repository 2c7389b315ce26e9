//! Action program vocabulary.
//!
//! An [`Action`] is one entry of an entity's program: what to do
//! ([`ActionKind`]), when it runs relative to its neighbours
//! ([`ExecutionMode`]), and an optional [`EventTrigger`] gate. Legacy key names
//! are accepted as serde aliases and never reach the executor.

use crate::geometry::{Direction, RelativeDirection, TurnAngle, TurnSide};

// ============================================================================
// Scheduling
// ============================================================================

/// How an action is scheduled within the owning program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ExecutionMode {
    /// Runs when the cursor reaches it, one per turn.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "sequential"))]
    Sequential,
    /// Skipped by the cursor; evaluated every turn in the trigger phase.
    #[cfg_attr(feature = "serde", serde(alias = "parallel"))]
    Parallel,
    /// Runs in the same step as the sequential action before it.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "parallel_with_previous", alias = "parallelWithPrevious")
    )]
    ParallelWithPrevious,
}

/// Predicate gating an event-triggered action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EventTrigger {
    /// A living opponent on any of the 8 neighbouring tiles.
    #[cfg_attr(feature = "serde", serde(alias = "enemy_adjacent", alias = "opponent_adjacent"))]
    OpponentAdjacent,
    /// A living opponent within Euclidean `range`.
    #[cfg_attr(feature = "serde", serde(alias = "enemy_in_range", alias = "opponent_in_range"))]
    OpponentInRange { range: u32 },
    /// A living opponent on the faced tile.
    #[cfg_attr(feature = "serde", serde(alias = "contact", alias = "opponent_contact"))]
    OpponentContact,
    #[cfg_attr(feature = "serde", serde(alias = "wall_ahead"))]
    WallAhead,
    #[cfg_attr(feature = "serde", serde(alias = "health_below_50", alias = "low_health"))]
    HealthBelowHalf,
}

impl EventTrigger {
    /// Triggers that imply a nearby opponent worth aiming at.
    pub fn is_proximity(self) -> bool {
        matches!(
            self,
            EventTrigger::OpponentAdjacent
                | EventTrigger::OpponentInRange { .. }
                | EventTrigger::OpponentContact
        )
    }

    /// Auto-target search radius for a proximity trigger.
    ///
    /// Neighbour triggers search unbounded: once they fire, the nearest
    /// opponent is always a neighbour.
    pub fn proximity_range(self) -> Option<u32> {
        match self {
            EventTrigger::OpponentInRange { range } => Some(range),
            _ => None,
        }
    }
}

// ============================================================================
// Movement
// ============================================================================

/// What a mover does when the next tile is a wall (or wall-like entity).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WallPolicy {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "stop"))]
    Stop,
    /// Ghost over walls to the first open tile beyond them.
    #[cfg_attr(feature = "serde", serde(alias = "continue", alias = "ghost"))]
    Continue,
    #[cfg_attr(feature = "serde", serde(alias = "turn_left"))]
    TurnLeft(TurnAngle),
    #[cfg_attr(feature = "serde", serde(alias = "turn_right"))]
    TurnRight(TurnAngle),
    #[cfg_attr(feature = "serde", serde(alias = "turn_around"))]
    TurnAround,
}

impl WallPolicy {
    /// Rotation applied before retrying, for the turning policies.
    pub fn rotation(self) -> Option<(TurnSide, TurnAngle)> {
        match self {
            WallPolicy::TurnLeft(angle) => Some((TurnSide::Left, angle)),
            WallPolicy::TurnRight(angle) => Some((TurnSide::Right, angle)),
            WallPolicy::TurnAround => Some((TurnSide::Around, TurnAngle::Deg180)),
            WallPolicy::Stop | WallPolicy::Continue => None,
        }
    }
}

// ============================================================================
// Targeting
// ============================================================================

/// Which opponents auto-targeting may aim at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetFilter {
    /// Only opponents sharing a row or column.
    #[cfg_attr(feature = "serde", serde(alias = "cardinal"))]
    Cardinal,
    /// Only opponents on an exact diagonal.
    #[cfg_attr(feature = "serde", serde(alias = "diagonal"))]
    Diagonal,
    /// Anyone; off-axis targets are approximated to the nearest of 8 directions.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "omni", alias = "all"))]
    Omni,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoTarget {
    pub filter: TargetFilter,
    #[cfg_attr(feature = "serde", serde(alias = "maxTargets"))]
    pub max_targets: u32,
    /// Euclidean search radius; `None` searches the whole board.
    pub range: Option<u32>,
}

impl Default for AutoTarget {
    fn default() -> Self {
        Self {
            filter: TargetFilter::Omni,
            max_targets: 1,
            range: None,
        }
    }
}

/// Per-action direction overrides for attacks and spells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Targeting {
    /// Absolute directions. Highest priority.
    #[cfg_attr(feature = "serde", serde(alias = "directionOverride", alias = "absolute"))]
    pub directions: Vec<Direction>,
    /// Offsets from the current facing.
    #[cfg_attr(feature = "serde", serde(alias = "relativeDirectionOverride"))]
    pub relative: Vec<RelativeDirection>,
    #[cfg_attr(feature = "serde", serde(alias = "autoTargetNearest"))]
    pub auto_target: Option<AutoTarget>,
}

impl Targeting {
    pub fn absolute(directions: Vec<Direction>) -> Self {
        Self {
            directions,
            ..Self::default()
        }
    }

    pub fn relative(relative: Vec<RelativeDirection>) -> Self {
        Self {
            relative,
            ..Self::default()
        }
    }

    pub fn nearest(auto_target: AutoTarget) -> Self {
        Self {
            auto_target: Some(auto_target),
            ..Self::default()
        }
    }

    /// No override at all; the asset's own direction mode applies.
    pub fn is_unspecified(&self) -> bool {
        self.directions.is_empty() && self.relative.is_empty() && self.auto_target.is_none()
    }
}

// ============================================================================
// Actions
// ============================================================================

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

/// What an action does.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    #[cfg_attr(feature = "serde", serde(alias = "move", alias = "move_forward"))]
    Move {
        #[cfg_attr(feature = "serde", serde(default = "one", alias = "tilesPerMove"))]
        tiles: u32,
        #[cfg_attr(feature = "serde", serde(default, alias = "onWallCollision"))]
        on_wall: WallPolicy,
        /// Travel direction relative to facing.
        #[cfg_attr(feature = "serde", serde(default))]
        relative: RelativeDirection,
    },
    #[cfg_attr(feature = "serde", serde(alias = "turn"))]
    Turn {
        side: TurnSide,
        #[cfg_attr(feature = "serde", serde(default))]
        angle: TurnAngle,
    },
    /// Strikes the faced tile.
    #[cfg_attr(feature = "serde", serde(alias = "attack_forward", alias = "attack"))]
    AttackForward { damage: i32 },
    /// Fires a straight projectile along the facing.
    #[cfg_attr(feature = "serde", serde(alias = "attack_range", alias = "ranged"))]
    AttackRange {
        damage: i32,
        range: u32,
        #[cfg_attr(feature = "serde", serde(default = "one"))]
        speed: u32,
    },
    #[cfg_attr(feature = "serde", serde(alias = "custom_attack"))]
    CustomAttack {
        #[cfg_attr(feature = "serde", serde(alias = "customAttackId"))]
        attack_id: String,
        #[cfg_attr(feature = "serde", serde(default))]
        targeting: Targeting,
    },
    #[cfg_attr(feature = "serde", serde(alias = "spell", alias = "spell_cast"))]
    SpellCast {
        #[cfg_attr(feature = "serde", serde(alias = "spellId"))]
        spell_id: String,
        #[cfg_attr(feature = "serde", serde(default))]
        targeting: Targeting,
    },
    #[cfg_attr(feature = "serde", serde(alias = "wait"))]
    Wait,
    /// Runs `then` when the faced tile is wall-like, `otherwise` when not.
    #[cfg_attr(feature = "serde", serde(alias = "if_wall", alias = "ifWall"))]
    IfWall {
        then: Box<ActionKind>,
        #[cfg_attr(feature = "serde", serde(default, alias = "else"))]
        otherwise: Option<Box<ActionKind>>,
    },
    /// Loops the program back to its first sequential action.
    #[cfg_attr(feature = "serde", serde(alias = "repeat"))]
    Repeat,
}

impl ActionKind {
    pub fn forward(tiles: u32) -> Self {
        ActionKind::Move {
            tiles,
            on_wall: WallPolicy::Stop,
            relative: RelativeDirection::Forward,
        }
    }

    pub fn move_with(tiles: u32, on_wall: WallPolicy) -> Self {
        ActionKind::Move {
            tiles,
            on_wall,
            relative: RelativeDirection::Forward,
        }
    }

    pub fn turn(side: TurnSide, angle: TurnAngle) -> Self {
        ActionKind::Turn { side, angle }
    }

    pub fn spell(spell_id: impl Into<String>) -> Self {
        ActionKind::SpellCast {
            spell_id: spell_id.into(),
            targeting: Targeting::default(),
        }
    }

    pub fn custom_attack(attack_id: impl Into<String>) -> Self {
        ActionKind::CustomAttack {
            attack_id: attack_id.into(),
            targeting: Targeting::default(),
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, ActionKind::Move { .. })
    }

    /// Targeting block for actions that carry one.
    pub fn targeting_mut(&mut self) -> Option<&mut Targeting> {
        match self {
            ActionKind::CustomAttack { targeting, .. } | ActionKind::SpellCast { targeting, .. } => {
                Some(targeting)
            }
            _ => None,
        }
    }
}

/// One entry of an action program.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub kind: ActionKind,
    #[cfg_attr(feature = "serde", serde(default, alias = "executionMode"))]
    pub mode: ExecutionMode,
    #[cfg_attr(feature = "serde", serde(default, alias = "eventTrigger"))]
    pub trigger: Option<EventTrigger>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            mode: ExecutionMode::Sequential,
            trigger: None,
        }
    }

    pub fn parallel(kind: ActionKind) -> Self {
        Self {
            mode: ExecutionMode::Parallel,
            ..Self::new(kind)
        }
    }

    pub fn with_previous(kind: ActionKind) -> Self {
        Self {
            mode: ExecutionMode::ParallelWithPrevious,
            ..Self::new(kind)
        }
    }

    pub fn with_trigger(mut self, trigger: EventTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Whether the program cursor runs this action (as opposed to the trigger phase).
    pub fn is_cursor_driven(&self) -> bool {
        self.mode != ExecutionMode::Parallel && self.trigger.is_none()
    }
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Action::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_policies_map_to_rotations() {
        assert_eq!(WallPolicy::Stop.rotation(), None);
        assert_eq!(
            WallPolicy::TurnLeft(TurnAngle::Deg135).rotation(),
            Some((TurnSide::Left, TurnAngle::Deg135))
        );
        assert_eq!(
            WallPolicy::TurnAround.rotation(),
            Some((TurnSide::Around, TurnAngle::Deg180))
        );
    }

    #[test]
    fn triggered_and_parallel_actions_leave_the_cursor() {
        assert!(Action::new(ActionKind::Wait).is_cursor_driven());
        assert!(Action::with_previous(ActionKind::Wait).is_cursor_driven());
        assert!(!Action::parallel(ActionKind::Wait).is_cursor_driven());
        assert!(
            !Action::new(ActionKind::Wait)
                .with_trigger(EventTrigger::WallAhead)
                .is_cursor_driven()
        );
    }

    #[test]
    fn only_in_range_triggers_bound_the_search() {
        assert!(EventTrigger::OpponentAdjacent.is_proximity());
        assert_eq!(EventTrigger::OpponentAdjacent.proximity_range(), None);
        assert_eq!(
            EventTrigger::OpponentInRange { range: 4 }.proximity_range(),
            Some(4)
        );
        assert!(!EventTrigger::HealthBelowHalf.is_proximity());
    }
}
