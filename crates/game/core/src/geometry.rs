//! Grid geometry: 8-way directions, turning, and tile lines.
//!
//! Coordinate system: X grows eastward, Y grows southward (row-major grids),
//! so `North` is `(0, -1)`. Directions are indexed clockwise from North, which
//! makes every rotation a modular add on the index.

use crate::state::Position;

// ============================================================================
// Direction
// ============================================================================

/// One of the eight compass directions an entity can face.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "north", alias = "up"))]
    North,
    #[cfg_attr(feature = "serde", serde(alias = "north_east", alias = "northeast"))]
    NorthEast,
    #[cfg_attr(feature = "serde", serde(alias = "east", alias = "right"))]
    East,
    #[cfg_attr(feature = "serde", serde(alias = "south_east", alias = "southeast"))]
    SouthEast,
    #[cfg_attr(feature = "serde", serde(alias = "south", alias = "down"))]
    South,
    #[cfg_attr(feature = "serde", serde(alias = "south_west", alias = "southwest"))]
    SouthWest,
    #[cfg_attr(feature = "serde", serde(alias = "west", alias = "left"))]
    West,
    #[cfg_attr(feature = "serde", serde(alias = "north_west", alias = "northwest"))]
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order starting at North.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Returns the clockwise index (North = 0).
    pub const fn index(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 1,
            Direction::East => 2,
            Direction::SouthEast => 3,
            Direction::South => 4,
            Direction::SouthWest => 5,
            Direction::West => 6,
            Direction::NorthWest => 7,
        }
    }

    /// Builds a direction from a clockwise index, wrapping modulo 8.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(8) as usize]
    }

    /// Returns the (dx, dy) step for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Direction whose offset has the same signs as `(dx, dy)`.
    ///
    /// Returns `None` for the zero vector.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        let step = (dx.signum(), dy.signum());
        Self::ALL.into_iter().find(|d| d.offset() == step)
    }

    /// Rotates clockwise by `steps` multiples of 45° (negative = counter-clockwise).
    pub fn rotate(self, steps: i32) -> Self {
        Self::from_index(self.index() as i32 + steps)
    }

    pub fn opposite(self) -> Self {
        self.rotate(4)
    }

    /// Turns toward `side` by `angle`.
    pub fn turn(self, side: TurnSide, angle: TurnAngle) -> Self {
        match side {
            TurnSide::Left => self.rotate(-angle.steps()),
            TurnSide::Right => self.rotate(angle.steps()),
            TurnSide::Around => self.opposite(),
        }
    }

    /// Resolves a facing-relative direction against this facing.
    pub fn relative(self, relative: RelativeDirection) -> Self {
        self.rotate(relative.steps())
    }

    pub const fn is_cardinal(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn is_diagonal(self) -> bool {
        !self.is_cardinal()
    }
}

// ============================================================================
// Turning
// ============================================================================

/// Which way an entity rotates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnSide {
    #[cfg_attr(feature = "serde", serde(alias = "left"))]
    Left,
    #[cfg_attr(feature = "serde", serde(alias = "right"))]
    Right,
    #[cfg_attr(feature = "serde", serde(alias = "around"))]
    Around,
}

/// Rotation magnitude in 45° steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnAngle {
    #[cfg_attr(feature = "serde", serde(alias = "45"))]
    Deg45,
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "90"))]
    Deg90,
    #[cfg_attr(feature = "serde", serde(alias = "135"))]
    Deg135,
    #[cfg_attr(feature = "serde", serde(alias = "180"))]
    Deg180,
}

impl TurnAngle {
    pub const fn steps(self) -> i32 {
        match self {
            TurnAngle::Deg45 => 1,
            TurnAngle::Deg90 => 2,
            TurnAngle::Deg135 => 3,
            TurnAngle::Deg180 => 4,
        }
    }

    pub const fn degrees(self) -> u32 {
        self.steps() as u32 * 45
    }
}

/// Direction expressed relative to the current facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RelativeDirection {
    #[default]
    Forward,
    ForwardRight,
    Right,
    BackRight,
    #[cfg_attr(feature = "serde", serde(alias = "Backward", alias = "backward"))]
    Back,
    BackLeft,
    Left,
    ForwardLeft,
}

impl RelativeDirection {
    /// Clockwise 45° steps from the facing.
    pub const fn steps(self) -> i32 {
        match self {
            RelativeDirection::Forward => 0,
            RelativeDirection::ForwardRight => 1,
            RelativeDirection::Right => 2,
            RelativeDirection::BackRight => 3,
            RelativeDirection::Back => 4,
            RelativeDirection::BackLeft => 5,
            RelativeDirection::Left => 6,
            RelativeDirection::ForwardLeft => 7,
        }
    }
}

// ============================================================================
// Distances and lines
// ============================================================================

/// Squared Euclidean distance between two tiles.
pub fn distance_sq(a: Position, b: Position) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

/// Whether `b` lies within Euclidean `radius` of `a`.
pub fn within_radius(a: Position, b: Position, radius: u32) -> bool {
    let r = radius as i64;
    distance_sq(a, b) <= r * r
}

/// Chebyshev (king-move) distance.
pub fn chebyshev(a: Position, b: Position) -> u32 {
    (a.x - b.x).unsigned_abs().max((a.y - b.y).unsigned_abs())
}

/// Rounds `num / den` to the nearest integer, halves toward +∞. `den` must be positive.
fn round_div(num: i64, den: i64) -> i64 {
    (2 * num + den).div_euclid(2 * den)
}

/// Discrete tile sequence from `from` (exclusive) to `to` (inclusive).
///
/// Takes `max(|dx|, |dy|)` steps and rounds each intermediate point to the
/// nearest tile, which yields a connected staircase for off-axis lines.
pub fn line_path(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x) as i64;
    let dy = (to.y - from.y) as i64;
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return Vec::new();
    }

    (1..=steps)
        .map(|i| {
            Position::new(
                from.x + round_div(dx * i, steps) as i32,
                from.y + round_div(dy * i, steps) as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_both_ways() {
        assert_eq!(Direction::North.rotate(-1), Direction::NorthWest);
        assert_eq!(Direction::NorthWest.rotate(1), Direction::North);
        assert_eq!(Direction::East.rotate(10), Direction::South);
        assert_eq!(Direction::SouthWest.opposite(), Direction::NorthEast);
    }

    #[test]
    fn turning_by_angle() {
        let facing = Direction::East;
        assert_eq!(facing.turn(TurnSide::Left, TurnAngle::Deg45), Direction::NorthEast);
        assert_eq!(facing.turn(TurnSide::Left, TurnAngle::Deg90), Direction::North);
        assert_eq!(facing.turn(TurnSide::Left, TurnAngle::Deg135), Direction::NorthWest);
        assert_eq!(facing.turn(TurnSide::Right, TurnAngle::Deg45), Direction::SouthEast);
        assert_eq!(facing.turn(TurnSide::Right, TurnAngle::Deg90), Direction::South);
        assert_eq!(facing.turn(TurnSide::Right, TurnAngle::Deg135), Direction::SouthWest);
        assert_eq!(facing.turn(TurnSide::Around, TurnAngle::Deg45), Direction::West);
    }

    #[test]
    fn relative_directions_resolve_against_facing() {
        assert_eq!(Direction::North.relative(RelativeDirection::Right), Direction::East);
        assert_eq!(Direction::South.relative(RelativeDirection::Back), Direction::North);
        assert_eq!(
            Direction::West.relative(RelativeDirection::ForwardLeft),
            Direction::SouthWest
        );
    }

    #[test]
    fn from_offset_uses_signs() {
        assert_eq!(Direction::from_offset(5, -2), Some(Direction::NorthEast));
        assert_eq!(Direction::from_offset(0, 3), Some(Direction::South));
        assert_eq!(Direction::from_offset(0, 0), None);
    }

    #[test]
    fn diagonal_line_is_a_connected_staircase() {
        let path = line_path(Position::new(0, 0), Position::new(4, 2));
        assert_eq!(
            path,
            vec![
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(3, 2),
                Position::new(4, 2),
            ]
        );
        for pair in path.windows(2) {
            assert_eq!(chebyshev(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn straight_line_covers_every_tile() {
        let path = line_path(Position::new(2, 2), Position::new(2, -1));
        assert_eq!(
            path,
            vec![Position::new(2, 1), Position::new(2, 0), Position::new(2, -1)]
        );
        assert!(line_path(Position::new(1, 1), Position::new(1, 1)).is_empty());
    }

    #[test]
    fn radius_is_euclidean() {
        let center = Position::new(0, 0);
        assert!(within_radius(center, Position::new(1, 1), 2));
        assert!(!within_radius(center, Position::new(2, 2), 2));
        assert!(within_radius(center, Position::new(0, 2), 2));
    }
}
