//! Solvability oracle for tactics puzzles.
//!
//! Given a puzzle and its character roster, [`solve`] decides whether some
//! subset and placement of the roster wins, reporting the minimum subset size
//! and a winning placement. Parameters are validated before any simulation
//! runs; the search is bounded by a combinations budget and reports partial
//! results instead of failing. [`solve_async`] runs the same search with
//! cooperative yields for interactive hosts.
pub mod config;
pub mod error;
pub mod placement;
pub mod result;
pub mod search;
pub mod validate;

pub use config::SolverConfig;
pub use error::SearchError;
pub use placement::{Arrangements, Combinations, arrangement_count, placement_tiles};
pub use result::{SolveResult, Solution};
pub use search::{Progress, Search, solve, solve_async};
pub use validate::validate;
