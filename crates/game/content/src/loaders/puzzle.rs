//! Puzzle file loader.
//!
//! Puzzle files describe the board as text rows plus per-tile overrides for
//! anything a single character cannot express (custom tile types, teleport
//! groups, cadences).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{
    CollectiblePlacement, EnemyPlacement, Grid, Position, Puzzle, Tile, TileKind, WinCondition,
};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Puzzle structure for RON files.
///
/// Layout legend: `.` empty, `#` wall, `G` goal, `_` or space void.
/// Short rows are padded with void.
///
/// ```ron
/// (
///     id: "first_steps",
///     layout: [
///         "....",
///         ".#.G",
///     ],
///     tiles: [(2, 0, (kind: Empty, custom: Some("spikes")))],
///     enemies: [(enemy_id: "slime", x: 3, y: 0)],
///     available_characters: ["knight"],
///     win_conditions: [DefeatAllEnemies],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Board rows, top row first.
    pub layout: Vec<String>,
    /// Explicit tiles replacing the layout cell at (x, y).
    #[serde(default)]
    pub tiles: Vec<(i32, i32, Tile)>,
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
    #[serde(default)]
    pub collectibles: Vec<CollectiblePlacement>,
    #[serde(default, alias = "availableCharacters")]
    pub available_characters: Vec<String>,
    #[serde(default = "default_max_characters", alias = "maxCharacters")]
    pub max_characters: u32,
    #[serde(default = "default_max_turns", alias = "maxTurns")]
    pub max_turns: u32,
    #[serde(default, alias = "winConditions")]
    pub win_conditions: Vec<WinCondition>,
}

fn default_max_characters() -> u32 {
    1
}

fn default_max_turns() -> u32 {
    20
}

fn parse_cell(symbol: char) -> LoadResult<Option<Tile>> {
    match symbol {
        '.' => Ok(Some(Tile::empty())),
        '#' => Ok(Some(Tile::wall())),
        'G' => Ok(Some(Tile::new(TileKind::Goal))),
        '_' | ' ' => Ok(None),
        other => Err(anyhow::anyhow!("Unknown layout symbol '{}'", other)),
    }
}

impl PuzzleFile {
    /// Builds the grid from the layout and overrides.
    pub fn grid(&self) -> LoadResult<Grid> {
        let rows = self
            .layout
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.chars()
                    .map(parse_cell)
                    .collect::<LoadResult<Vec<_>>>()
                    .map_err(|e| anyhow::anyhow!("Layout row {}: {}", y, e))
            })
            .collect::<LoadResult<Vec<_>>>()?;
        let mut grid = Grid::from_rows(rows);

        for (x, y, tile) in &self.tiles {
            let position = Position::new(*x, *y);
            if !grid.contains(position) {
                return Err(anyhow::anyhow!(
                    "Tile override at {} is outside the {}x{} layout",
                    position,
                    grid.width(),
                    grid.height()
                ));
            }
            grid.set(position, Some(tile.clone()));
        }
        Ok(grid)
    }

    /// Converts the file into a core [`Puzzle`].
    pub fn into_puzzle(self) -> LoadResult<Puzzle> {
        let grid = self.grid()?;
        Ok(Puzzle {
            id: self.id,
            name: self.name,
            grid,
            enemies: self.enemies,
            collectibles: self.collectibles,
            available_characters: self.available_characters,
            max_characters: self.max_characters,
            max_turns: self.max_turns,
            win_conditions: self.win_conditions,
        })
    }
}

/// Loader for puzzles from RON files.
pub struct PuzzleLoader;

impl PuzzleLoader {
    /// Load a puzzle from a RON file.
    pub fn load(path: &Path) -> LoadResult<Puzzle> {
        let content = read_file(path)?;
        let puzzle = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load puzzle {}: {}", path.display(), e))?;
        debug!(
            path = %path.display(),
            puzzle = %puzzle.id,
            width = puzzle.width(),
            height = puzzle.height(),
            "puzzle loaded"
        );
        Ok(puzzle)
    }

    /// Parse a puzzle from RON text.
    pub fn parse(content: &str) -> LoadResult<Puzzle> {
        let file: PuzzleFile = ron::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))?;
        file.into_puzzle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_symbols_map_to_tiles() {
        let puzzle = PuzzleLoader::parse(
            r#"(
                id: "tiny",
                layout: [".#G", "_."],
                tiles: [(0, 0, (kind: Empty, teleport_group: Some(1)))],
                win_conditions: [ReachGoal(count: 1)],
            )"#,
        )
        .expect("valid puzzle");

        assert_eq!((puzzle.width(), puzzle.height()), (3, 2));
        assert!(puzzle.grid.is_wall(Position::new(1, 0)));
        assert_eq!(
            puzzle.grid.tile(Position::new(2, 0)).map(|t| t.kind),
            Some(TileKind::Goal)
        );
        assert!(puzzle.grid.is_void(Position::new(0, 1)));
        assert!(puzzle.grid.is_void(Position::new(2, 1)));
        assert_eq!(
            puzzle.grid.tile(Position::new(0, 0)).and_then(|t| t.teleport_group),
            Some(1)
        );
        assert_eq!(puzzle.max_turns, 20);
        assert_eq!(puzzle.max_characters, 1);
        assert_eq!(puzzle.win_conditions, vec![WinCondition::ReachGoal { count: 1 }]);
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        let error = PuzzleLoader::parse(r#"(id: "bad", layout: ["..x"])"#)
            .expect_err("x is not a layout symbol");
        assert!(error.to_string().contains("'x'"), "{error}");
    }

    #[test]
    fn overrides_must_land_on_the_board() {
        let error = PuzzleLoader::parse(
            r#"(id: "bad", layout: [".."], tiles: [(5, 0, (kind: Wall))])"#,
        )
        .expect_err("override off the board");
        assert!(error.to_string().contains("outside"), "{error}");
    }
}
