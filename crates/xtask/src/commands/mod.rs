//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod list;
mod simulate;
mod solve;
mod validate;

pub use list::List;
pub use simulate::Simulate;
pub use solve::Solve;
pub use validate::Validate;
