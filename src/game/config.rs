use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the game board and its timers
///
/// Board coordinates are in pixels; every position on the board is a
/// multiple of `cell_size`. The defaults reproduce the classic 400x400
/// board with 20 pixel cells and the snake starting at (200, 200).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board in pixels
    pub width: u32,
    /// Height of the board in pixels
    pub height: u32,
    /// Size of one grid cell in pixels; the unit of all movement
    pub cell_size: u32,
    /// Head position of the single-segment snake at game start
    pub origin_x: i32,
    pub origin_y: i32,
    /// Start each round with food away from where the last round left it
    pub avoid_previous_food: bool,

    /// First value shown by the countdown
    pub countdown_from: u8,
    /// Delay between countdown steps
    pub countdown_step_ms: u64,
    /// How long the start announcement stays up before ticking begins
    pub announce_ms: u64,
    /// Interval between two game ticks
    pub tick_ms: u64,
    /// Text shown once the countdown reaches zero
    pub start_message: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            cell_size: 20,
            origin_x: 200,
            origin_y: 200,
            avoid_previous_food: true,
            countdown_from: 3,
            countdown_step_ms: 500,
            announce_ms: 500,
            tick_ms: 100,
            start_message: "LOVE !".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size, keeping the
    /// origin at the board centre
    pub fn new(width: u32, height: u32) -> Self {
        let defaults = Self::default();
        let cell = defaults.cell_size;
        Self {
            width,
            height,
            origin_x: ((width / cell / 2) * cell) as i32,
            origin_y: ((height / cell / 2) * cell) as i32,
            ..defaults
        }
    }

    /// Number of columns on the board
    pub fn columns(&self) -> u32 {
        self.width / self.cell_size.max(1)
    }

    /// Number of rows on the board
    pub fn rows(&self) -> u32 {
        self.height / self.cell_size.max(1)
    }

    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }

    pub fn announce_delay(&self) -> Duration {
        Duration::from_millis(self.announce_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Check that the board is made of whole cells and the origin sits on one
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if self.width == 0
            || self.height == 0
            || self.width % self.cell_size != 0
            || self.height % self.cell_size != 0
        {
            return Err(ConfigError::MisalignedBoard {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }

        // Pixel coordinates are i32 and cell counts are indexed as usize
        let too_large = ConfigError::BoardTooLarge {
            width: self.width,
            height: self.height,
        };
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(too_large);
        }
        let Some(cells) = self.columns().checked_mul(self.rows()) else {
            return Err(too_large);
        };
        if cells < 2 {
            return Err(ConfigError::BoardTooSmall { cells });
        }

        let cell = self.cell_size as i32;
        let aligned = self.origin_x % cell == 0 && self.origin_y % cell == 0;
        let inside = (0..self.width as i32).contains(&self.origin_x)
            && (0..self.height as i32).contains(&self.origin_y);
        if !aligned || !inside {
            return Err(ConfigError::InvalidOrigin {
                x: self.origin_x,
                y: self.origin_y,
            });
        }

        if self.countdown_from == 0 {
            return Err(ConfigError::EmptyCountdown);
        }

        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(())
    }
}
