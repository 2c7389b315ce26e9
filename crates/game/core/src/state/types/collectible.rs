use super::Position;

/// A collectible instance on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectibleState {
    /// Definition id in the collectible oracle.
    pub collectible_id: String,
    pub position: Position,
    pub collected: bool,
    /// Dropped by a dying enemy rather than placed by the puzzle.
    pub dropped: bool,
}

impl CollectibleState {
    pub fn new(collectible_id: impl Into<String>, position: Position) -> Self {
        Self {
            collectible_id: collectible_id.into(),
            position,
            collected: false,
            dropped: false,
        }
    }
}
