//! Optional remote leaderboard
//!
//! `client` speaks HTTP, `tasks` keeps it off the UI task, `panel` holds
//! what the player sees. No failure here ever reaches the caller as an error.

pub mod client;
pub mod panel;
pub mod tasks;

pub use client::{validate_nickname, LeaderboardClient, LeaderboardConfig, LeaderboardEntry};
pub use panel::{LeaderboardPanel, PanelContent};
pub use tasks::{LeaderboardReply, LeaderboardTasks, ReplyKind};
