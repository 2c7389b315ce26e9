//! Reasons a search ended without a definitive answer.
//!
//! None of these abort the caller: they travel as the `error` message of a
//! [`crate::SolveResult`] so a host can show it and retry with new parameters.

use tactics_core::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid puzzle: {}", issues.join("; "))]
    Invalid { issues: Vec<String> },

    #[error("no valid placement tiles: every tile is a wall, void, occupied, or blocks placement")]
    NoPlacementTiles,

    #[error(
        "combination budget of {budget} exhausted before the search completed; raise max_combinations to search further"
    )]
    BudgetExhausted { budget: u64 },
}

impl GameError for SearchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SearchError::Invalid { .. } | SearchError::NoPlacementTiles => {
                ErrorSeverity::Validation
            }
            SearchError::BudgetExhausted { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SearchError::Invalid { .. } => "SOLVER_INVALID_PUZZLE",
            SearchError::NoPlacementTiles => "SOLVER_NO_PLACEMENT_TILES",
            SearchError::BudgetExhausted { .. } => "SOLVER_BUDGET_EXHAUSTED",
        }
    }
}
