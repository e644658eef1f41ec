use std::time::Duration;

use tokio::time::Instant;

/// Round clock: ticking while the snake moves, frozen otherwise
#[derive(Debug, Clone, Copy)]
enum RoundClock {
    Stopped(Duration),
    Running(Instant),
}

impl Default for RoundClock {
    fn default() -> Self {
        RoundClock::Stopped(Duration::ZERO)
    }
}

/// Numbers carried across rounds and shown in the header
#[derive(Debug, Default)]
pub struct SessionStats {
    best_score: u32,
    games_played: u32,
    clock: RoundClock,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Time spent moving in the current or last round
    pub fn elapsed(&self) -> Duration {
        match self.clock {
            RoundClock::Stopped(total) => total,
            RoundClock::Running(since) => since.elapsed(),
        }
    }

    pub fn on_round_start(&mut self) {
        self.clock = RoundClock::Running(Instant::now());
    }

    /// Stop the clock and fold the score into the session
    pub fn on_game_over(&mut self, final_score: u32) {
        self.clock = RoundClock::Stopped(self.elapsed());
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    /// Elapsed round time as `mm:ss`
    pub fn format_time(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
