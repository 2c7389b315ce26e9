//! Custom tile types: behaviors triggered when an entity enters a tile.

use crate::geometry::Direction;
use crate::state::Cadence;

/// Provides custom tile types by id.
pub trait TileOracle: Send + Sync {
    fn tile_type(&self, id: &str) -> Option<&CustomTileType>;
}

/// Remote effect of a pressure plate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlateEffect {
    /// Flip the tile at (x, y) between wall and empty.
    #[cfg_attr(feature = "serde", serde(alias = "toggle_wall"))]
    ToggleWall { x: i32, y: i32 },
    /// Bring the dormant enemy at this puzzle index onto the board.
    #[cfg_attr(feature = "serde", serde(alias = "spawn_enemy"))]
    SpawnEnemy { index: usize },
    /// Take the enemy at this puzzle index off the board.
    #[cfg_attr(feature = "serde", serde(alias = "despawn_enemy"))]
    DespawnEnemy { index: usize },
}

/// One behavior of a custom tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileBehavior {
    #[cfg_attr(feature = "serde", serde(alias = "damage"))]
    Damage {
        amount: i32,
        #[cfg_attr(feature = "serde", serde(default, alias = "oncePerEntity"))]
        once_per_entity: bool,
    },
    /// Relocates to the partner tile sharing this tile's teleport group.
    #[cfg_attr(feature = "serde", serde(alias = "teleport"))]
    Teleport,
    /// Forces the entity to face `direction`.
    #[cfg_attr(feature = "serde", serde(alias = "redirect", alias = "direction_change"))]
    Redirect { direction: Direction },
    /// Slides the entity onward until it is blocked.
    #[cfg_attr(feature = "serde", serde(alias = "ice"))]
    Ice,
    #[cfg_attr(feature = "serde", serde(alias = "pressure_plate"))]
    PressurePlate { effect: PlateEffect },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomTileType {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behaviors: Vec<TileBehavior>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cadence: Option<Cadence>,
    /// The oracle never places characters here.
    #[cfg_attr(feature = "serde", serde(default, alias = "preventPlacement"))]
    pub blocks_placement: bool,
}

impl CustomTileType {
    pub fn new(id: impl Into<String>, behaviors: Vec<TileBehavior>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            behaviors,
            cadence: None,
            blocks_placement: false,
        }
    }

    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = Some(cadence);
        self
    }

    pub fn blocking_placement(mut self) -> Self {
        self.blocks_placement = true;
        self
    }
}
