use super::Position;

/// Base classification of a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "empty", alias = "floor", alias = "Floor"))]
    Empty,
    #[cfg_attr(feature = "serde", serde(alias = "wall"))]
    Wall,
    #[cfg_attr(feature = "serde", serde(alias = "goal"))]
    Goal,
}

/// On/off activation schedule keyed on the absolute turn number (1-based).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cadence {
    /// Flips every turn. `start_active` decides the state on turn 1.
    Alternating { start_active: bool },
    /// `on` active turns followed by `off` inactive turns, shifted by `offset`.
    Interval { on: u32, off: u32, offset: u32 },
    /// Explicit repeating pattern. Empty means always active.
    Pattern(Vec<bool>),
}

impl Cadence {
    pub fn is_active(&self, turn: u32) -> bool {
        let t = turn.saturating_sub(1);
        match self {
            Cadence::Alternating { start_active } => (t % 2 == 0) == *start_active,
            Cadence::Interval { on, off, offset } => {
                let cycle = u64::from(*on) + u64::from(*off);
                if cycle == 0 {
                    return true;
                }
                (u64::from(t) + u64::from(*offset)) % cycle < u64::from(*on)
            }
            Cadence::Pattern(pattern) => {
                if pattern.is_empty() {
                    return true;
                }
                pattern[t as usize % pattern.len()]
            }
        }
    }
}

/// A non-void grid cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    /// Custom tile type id resolved through the tile oracle.
    #[cfg_attr(feature = "serde", serde(default))]
    pub custom: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, alias = "teleportGroup"))]
    pub teleport_group: Option<u32>,
    /// Overrides the custom tile type's cadence.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cadence: Option<Cadence>,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::new(TileKind::Empty)
    }

    pub fn wall() -> Self {
        Self::new(TileKind::Wall)
    }

    pub fn goal() -> Self {
        Self::new(TileKind::Goal)
    }

    pub fn with_custom(mut self, custom: impl Into<String>) -> Self {
        self.custom = Some(custom.into());
        self
    }

    pub fn with_teleport_group(mut self, group: u32) -> Self {
        self.teleport_group = Some(group);
        self
    }

    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = Some(cadence);
        self
    }

    pub fn is_wall(&self) -> bool {
        self.kind == TileKind::Wall
    }
}

/// Rectangular tile grid; `None` cells are void.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Creates a grid filled with empty tiles.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Some(Tile::empty()); (width * height) as usize],
        }
    }

    /// Builds a grid from row-major rows. Short rows are padded with void.
    pub fn from_rows(rows: Vec<Vec<Option<Tile>>>) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut cells = Vec::with_capacity((width * height) as usize);
        for mut row in rows {
            row.resize(width as usize, None);
            cells.extend(row);
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// The tile at `position`, or `None` for void and out-of-bounds cells.
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).and_then(|i| self.cells[i].as_ref())
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.index(position).and_then(|i| self.cells[i].as_mut())
    }

    /// Replaces the cell at `position`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, position: Position, tile: Option<Tile>) {
        if let Some(i) = self.index(position) {
            self.cells[i] = tile;
        }
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::is_wall)
    }

    /// Void or outside the grid.
    pub fn is_void(&self, position: Position) -> bool {
        self.tile(position).is_none()
    }

    /// Iterates every non-void tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|tile| {
                (
                    Position::new((i % width) as i32, (i / width) as i32),
                    tile,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_cadence_flips_every_turn() {
        let cadence = Cadence::Alternating { start_active: true };
        assert!(cadence.is_active(1));
        assert!(!cadence.is_active(2));
        assert!(cadence.is_active(3));

        let inverted = Cadence::Alternating {
            start_active: false,
        };
        assert!(!inverted.is_active(1));
        assert!(inverted.is_active(2));
    }

    #[test]
    fn interval_cadence_respects_offset() {
        let cadence = Cadence::Interval {
            on: 2,
            off: 1,
            offset: 0,
        };
        let states: Vec<bool> = (1..=6).map(|t| cadence.is_active(t)).collect();
        assert_eq!(states, vec![true, true, false, true, true, false]);

        let shifted = Cadence::Interval {
            on: 2,
            off: 1,
            offset: 2,
        };
        assert!(!shifted.is_active(1));
        assert!(shifted.is_active(2));
    }

    #[test]
    fn interval_cadence_handles_degenerate_and_huge_values() {
        let empty = Cadence::Interval {
            on: 0,
            off: 0,
            offset: 0,
        };
        assert!(empty.is_active(1));
        assert!(empty.is_active(u32::MAX));

        let never = Cadence::Interval {
            on: 0,
            off: 3,
            offset: 1,
        };
        assert!((1..=6).all(|t| !never.is_active(t)));

        let huge = Cadence::Interval {
            on: u32::MAX,
            off: u32::MAX,
            offset: 0,
        };
        assert!(huge.is_active(1));
        assert!(huge.is_active(u32::MAX));

        let shifted = Cadence::Interval {
            on: u32::MAX,
            off: u32::MAX,
            offset: u32::MAX,
        };
        assert!(!shifted.is_active(1));
        assert!(!shifted.is_active(u32::MAX));
    }

    #[test]
    fn pattern_cadence_repeats() {
        let cadence = Cadence::Pattern(vec![false, true, true]);
        let states: Vec<bool> = (1..=4).map(|t| cadence.is_active(t)).collect();
        assert_eq!(states, vec![false, true, true, false]);
        assert!(Cadence::Pattern(Vec::new()).is_active(7));
    }

    #[test]
    fn void_cells_are_not_tiles() {
        let grid = Grid::from_rows(vec![
            vec![Some(Tile::empty()), None],
            vec![Some(Tile::wall())],
        ]);
        assert_eq!(grid.width(), 2);
        assert!(grid.is_void(Position::new(1, 0)));
        assert!(grid.is_void(Position::new(1, 1)));
        assert!(grid.is_void(Position::new(-1, 0)));
        assert!(grid.is_wall(Position::new(0, 1)));
        assert_eq!(grid.tiles().count(), 2);
    }
}
