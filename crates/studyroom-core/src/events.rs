use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::QuizPhase;
use crate::session::SessionRecord;

/// Every state change in the system produces an Event.
/// Front ends drain them from the driver channel; nothing is pushed to a UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StopwatchStarted {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    StopwatchStopped {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Reset was requested with nothing measured; no record is created.
    NothingToSave {
        at: DateTime<Utc>,
    },
    CountdownStarted {
        remaining_secs: u64,
        resumed: bool,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownReset {
        target_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero and is waiting for the save prompt.
    CountdownExpired {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    SessionSaved {
        record: SessionRecord,
        at: DateTime<Utc>,
    },
    QuizPhaseChanged {
        phase: QuizPhase,
        at: DateTime<Utc>,
    },
}
