//! Error types shared across the crate

use thiserror::Error;

/// Invalid game configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("board {width}x{height} must be a non-empty multiple of cell size {cell_size}")]
    MisalignedBoard {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error("board {width}x{height} is too large")]
    BoardTooLarge { width: u32, height: u32 },

    #[error("board needs at least two cells, got {cells}")]
    BoardTooSmall { cells: u32 },

    #[error("origin ({x}, {y}) is not an aligned cell inside the board")]
    InvalidOrigin { x: i32, y: i32 },

    #[error("countdown must start at 1 or more")]
    EmptyCountdown,

    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}

/// Failures of the leaderboard collaborator
///
/// None of these are fatal; the UI turns each one into a fixed message.
#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("nickname is empty")]
    EmptyNickname,

    #[error("score was already submitted for this round")]
    AlreadySubmitted,

    #[error("leaderboard request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("leaderboard response could not be read: {0}")]
    Body(#[from] std::io::Error),
}

impl From<ureq::Error> for LeaderboardError {
    fn from(err: ureq::Error) -> Self {
        LeaderboardError::Http(Box::new(err))
    }
}
