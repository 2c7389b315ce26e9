//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// An oracle required by the caller is missing from the environment.
///
/// The simulation itself never surfaces these: a missing oracle behaves like a
/// missing asset and the affected action degrades to a no-op. Setup code that
/// cannot proceed without one (placing characters, spawning enemies) does.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ActorOracle not available")]
    ActorsNotAvailable,

    #[error("AbilityOracle not available")]
    AbilitiesNotAvailable,

    #[error("TileOracle not available")]
    TilesNotAvailable,

    #[error("StatusOracle not available")]
    StatusesNotAvailable,

    #[error("CollectibleOracle not available")]
    CollectiblesNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ActorsNotAvailable => "ORACLE_ACTORS_NOT_AVAILABLE",
            AbilitiesNotAvailable => "ORACLE_ABILITIES_NOT_AVAILABLE",
            TilesNotAvailable => "ORACLE_TILES_NOT_AVAILABLE",
            StatusesNotAvailable => "ORACLE_STATUSES_NOT_AVAILABLE",
            CollectiblesNotAvailable => "ORACLE_COLLECTIBLES_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
