//! Combat resolution.
//!
//! Every health change in the simulation funnels through this module:
//!
//! - `apply_damage`: shield absorption, wake-on-hit, death handling
//! - `apply_heal`: capped restoration
//! - `resolve_contact`: collision exchange ordered by melee priority

pub mod contact;
pub mod damage;

pub use contact::{ContactOutcome, resolve_contact};
pub use damage::{DamageKind, DamageOutcome, apply_damage, apply_heal, kill};
