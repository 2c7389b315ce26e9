//! Deterministic simulation core for grid tactics puzzles.
//!
//! `tactics-core` defines the canonical rules (action programs, contact combat,
//! projectiles, status effects, turn scheduling, win conditions) and exposes
//! pure APIs that both the solver and offline tools reuse. Nothing in this
//! crate performs I/O or reads the wall clock: identical inputs always yield an
//! identical run. All in-turn state mutation flows through
//! [`engine::GameEngine`]; assets are read through the oracles in [`env`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod geometry;
pub mod projectile;
pub mod puzzle;
pub mod runner;
pub mod state;
pub mod status;

pub use action::{
    Action, ActionKind, ActionOutcome, AutoTarget, EventTrigger, ExecutionMode, TargetFilter,
    Targeting, WallPolicy,
};
pub use config::SimulationConfig;
pub use engine::GameEngine;
pub use env::{
    AbilityOracle, ActorOracle, AssetCatalog, CharacterDefinition, CollectibleDefinition,
    CollectibleKind, CollectibleOracle, CustomAttackAsset, CustomTileType, EnemyDefinition, Env,
    GameEnv, OracleError, RngOracle, SpellAsset, StatusEffectAsset, StatusOracle, TileOracle,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use geometry::{Direction, RelativeDirection, TurnAngle, TurnSide};
pub use puzzle::{
    CollectiblePlacement, EnemyPlacement, Placement, Puzzle, SetupError, WinCondition,
    instantiate,
};
pub use runner::{RunOutcome, run_state, simulate};
pub use state::{
    EndReason, Entity, EntityId, GameState, GameStatus, Grid, Position, StateSnapshot, Team,
    Tile, TileKind,
};
