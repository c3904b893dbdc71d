mod countdown;
mod driver;
mod manual;
mod scheduler;
mod stopwatch;
mod study;

use serde::{Deserialize, Serialize};

use crate::events::Event;

pub use countdown::{Countdown, DEFAULT_TARGET_SECS};
pub use driver::{EventSink, TimerDriver};
pub use manual::{duration_between, parse_clock, ManualEntry};
pub use scheduler::{ManualScheduler, Scheduler, TickFlow, TickFn, TickHandle, TokioScheduler};
pub use stopwatch::Stopwatch;
pub use study::{StudyTimer, TICK_PERIOD};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

/// An engine that advances by one period per call.
pub trait Tick: Send + 'static {
    fn tick(&mut self) -> Option<Event>;
    fn is_running(&self) -> bool;
}

/// Measured time waiting for the user to confirm a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSave {
    pub duration_secs: u64,
}

/// Outcome of asking the stopwatch to reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetRequest {
    /// Nothing was measured; no record will be created.
    NothingToSave,
    /// Show the confirmation prompt for this much time.
    Confirm(PendingSave),
}
