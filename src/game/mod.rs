//! Core game logic module for Snake
//!
//! Pure state and rules, no I/O or timers. The lifecycle controller decides
//! when `TickEngine::advance` runs; the renderer only reads `GameState`.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{TickEngine, TickOutcome};
pub use state::{CollisionType, EndReason, GameState, Position, RunState, Snake};
