//! Snake Arcade - countdown-started Snake with an optional remote leaderboard
//!
//! This library provides:
//! - Core game rules and the tick engine (game module)
//! - Countdown and tick scheduling (lifecycle module)
//! - Leaderboard HTTP client and UI state (leaderboard module)
//! - TUI rendering and key handling (render, input modules)
//! - The interactive terminal mode (modes module)

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod lifecycle;
pub mod metrics;
pub mod modes;
pub mod render;
