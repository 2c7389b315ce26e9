use std::fmt;

use crate::geometry::Direction;

/// Stable arena index for an entity tracked in the state.
///
/// Characters are allocated first (in placement order), enemies after them
/// (in puzzle order). Ids are never reused within a run, and entities are never
/// removed from the arena on death.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The tile `distance` steps away in `direction`.
    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// The adjacent tile in `direction`.
    pub fn neighbor(self, direction: Direction) -> Self {
        self.step(direction, 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Side an entity fights for. Characters and enemies oppose each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Team {
    Character,
    Enemy,
}

impl Team {
    pub const fn opponent(self) -> Self {
        match self {
            Team::Character => Team::Enemy,
            Team::Enemy => Team::Character,
        }
    }

    pub fn opposes(self, other: Team) -> bool {
        self != other
    }
}
