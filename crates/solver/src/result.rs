//! Search result contract.

use serde::{Deserialize, Serialize};
use tactics_core::Placement;

/// A winning placement and how long it took.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub placements: Vec<Placement>,
    pub turns_to_win: u32,
}

/// Outcome of a solvability search.
///
/// `solvable == false` with an `error` means the answer is unknown (invalid
/// input, no tiles, budget ran out); without one it means every candidate
/// was tried and none won.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    pub solvable: bool,
    pub min_characters_needed: Option<u32>,
    pub solution_found: Option<Solution>,
    pub total_combinations_tested: u64,
    pub search_time_ms: f64,
    pub error: Option<String>,
}

impl SolveResult {
    /// Same answer, ignoring timing.
    pub fn same_answer(&self, other: &SolveResult) -> bool {
        self.solvable == other.solvable
            && self.min_characters_needed == other.min_characters_needed
            && self.solution_found == other.solution_found
            && self.total_combinations_tested == other.total_combinations_tested
            && self.error == other.error
    }
}
