//! Countdown and game lifecycle
//!
//! The controller is a plain state machine; the caller sleeps until
//! `next_deadline()` and then calls `on_timer()`.

pub mod controller;
pub mod timer;

pub use controller::{LifecycleController, LifecycleEvent, Phase};
pub use timer::{sleep_until_deadline, Schedule, ScheduledTask};
