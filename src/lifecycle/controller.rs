use tokio::time::Instant;
use tracing::{debug, info};

use super::timer::{Schedule, ScheduledTask};
use crate::game::{Direction, EndReason, GameState, TickEngine, TickOutcome};

/// Where the round currently is, from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing started yet
    Idle,
    /// Counting down; holds the value currently on screen
    Counting(u8),
    /// Countdown finished, start message on screen
    Announcing,
    Running,
    Ended,
}

/// What a timer firing did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    CountdownStep(u8),
    Announced,
    Started,
    Ticked(TickOutcome),
    GameOver { score: u32, reason: EndReason },
}

/// Drives countdown, ticking and game over around a `TickEngine`
///
/// Every transition that waits goes through the one `ScheduledTask`; starting
/// a game or ending one always cancels whatever was pending first, so there
/// is never more than one tick loop.
pub struct LifecycleController {
    engine: TickEngine,
    phase: Phase,
    task: ScheduledTask,
    generation: u64,
}

impl LifecycleController {
    pub fn new(engine: TickEngine) -> Self {
        Self {
            engine,
            phase: Phase::Idle,
            task: ScheduledTask::new(),
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn engine(&self) -> &TickEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TickEngine {
        &mut self.engine
    }

    /// Bumped on every start; async results carry it to detect staleness
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Deadline of the pending timer, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.task.deadline()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.task.is_scheduled()
    }

    /// Final score, once the round is over
    pub fn final_score(&self) -> Option<u32> {
        (self.phase == Phase::Ended).then(|| self.engine.state().score)
    }

    /// Text to show instead of the board, if any
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            Phase::Counting(n) => Some(n.to_string()),
            Phase::Announcing => Some(self.engine.config().start_message.clone()),
            _ => None,
        }
    }

    /// Start a new game; also used for restarting from any phase
    pub fn start(&mut self) {
        self.task.cancel();
        self.engine.reset();
        self.engine.begin_countdown();
        self.generation += 1;

        let from = self.engine.config().countdown_from;
        self.phase = Phase::Counting(from);
        self.task
            .schedule(Schedule::Once(self.engine.config().countdown_step()));

        debug!(generation = self.generation, from, "countdown started");
    }

    /// Forward a direction change; ignored unless the game is running
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        self.engine.queue_direction(direction)
    }

    /// Handle the pending timer firing
    ///
    /// Returns `None` when nothing was scheduled.
    pub fn on_timer(&mut self) -> Option<LifecycleEvent> {
        if !self.task.fire() {
            return None;
        }

        match self.phase {
            Phase::Counting(n) if n > 1 => {
                self.phase = Phase::Counting(n - 1);
                self.task
                    .schedule(Schedule::Once(self.engine.config().countdown_step()));
                Some(LifecycleEvent::CountdownStep(n - 1))
            }
            Phase::Counting(_) => {
                self.phase = Phase::Announcing;
                self.task
                    .schedule(Schedule::Once(self.engine.config().announce_delay()));
                debug!("countdown finished");
                Some(LifecycleEvent::Announced)
            }
            Phase::Announcing => {
                self.phase = Phase::Running;
                self.engine.begin_running();
                self.task
                    .schedule(Schedule::Every(self.engine.config().tick_interval()));
                debug!(generation = self.generation, "game running");
                Some(LifecycleEvent::Started)
            }
            Phase::Running => {
                let outcome = self.engine.advance();
                if !outcome.ends_round() {
                    return Some(LifecycleEvent::Ticked(outcome));
                }

                self.task.cancel();
                self.phase = Phase::Ended;

                let state = self.engine.state();
                let reason = state.end_reason.unwrap_or(EndReason::BoardFilled);
                info!(score = state.score, ?reason, "game over");
                Some(LifecycleEvent::GameOver {
                    score: state.score,
                    reason,
                })
            }
            Phase::Idle | Phase::Ended => {
                self.task.cancel();
                None
            }
        }
    }
}
