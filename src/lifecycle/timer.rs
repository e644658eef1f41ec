use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// When the owned task should fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Fire once after the delay
    Once(Duration),
    /// Fire every period, first time one period from now
    Every(Duration),
}

/// The single scheduled task owned by the lifecycle controller
///
/// Holds at most one pending deadline. Scheduling always replaces whatever
/// was pending, and cancelling an idle task is a no-op.
#[derive(Debug, Default)]
pub struct ScheduledTask {
    next: Option<Instant>,
    period: Option<Duration>,
}

impl ScheduledTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, schedule: Schedule) {
        self.cancel();

        let now = Instant::now();
        match schedule {
            Schedule::Once(delay) => {
                self.next = Some(now + delay);
            }
            Schedule::Every(period) => {
                self.next = Some(now + period);
                self.period = Some(period);
            }
        }
    }

    pub fn cancel(&mut self) {
        self.next = None;
        self.period = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.next.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Consume the current firing
    ///
    /// One-shot tasks become idle, periodic ones move to their next deadline.
    /// A periodic task that fell behind skips the missed beats and waits a
    /// full period from now. Returns false if nothing was scheduled.
    pub fn fire(&mut self) -> bool {
        let Some(at) = self.next else {
            return false;
        };

        self.next = self.period.map(|period| {
            let now = Instant::now();
            let due = at + period;
            if due > now {
                due
            } else {
                now + period
            }
        });
        true
    }
}

/// Sleep until `deadline`, or forever when there is none
pub async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
