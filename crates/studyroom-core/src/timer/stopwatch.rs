//! Up-counting study stopwatch.
//!
//! Counts whole seconds while running. Nothing is recorded until the caller
//! resets and confirms, at which point the elapsed time becomes one
//! [`SessionRecord`] and the counter returns to zero.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{PendingSave, ResetRequest, Tick, TimerPhase};
use crate::events::Event;
use crate::session::{SessionDraft, SessionRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    phase: TimerPhase,
    elapsed_secs: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Returns `None` when already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.phase == TimerPhase::Running {
            return None;
        }
        self.phase = TimerPhase::Running;
        Some(Event::StopwatchStarted {
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        })
    }

    /// Halt counting; the elapsed value is kept.
    pub fn stop(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.phase = TimerPhase::Idle;
        Some(Event::StopwatchStopped {
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        })
    }

    /// Ask to commit the measured time.
    ///
    /// Does not change any state: the caller shows the confirmation prompt
    /// and then calls [`Stopwatch::confirm_reset`]. Declining simply drops
    /// the returned request.
    pub fn reset(&self) -> ResetRequest {
        if self.elapsed_secs == 0 {
            ResetRequest::NothingToSave
        } else {
            ResetRequest::Confirm(PendingSave {
                duration_secs: self.elapsed_secs,
            })
        }
    }

    /// Commit a confirmed reset: build the record, stop and zero the counter.
    ///
    /// The record holds the time measured when the reset was requested, even
    /// if more ticks arrived while the prompt was open.
    pub fn confirm_reset(
        &mut self,
        pending: PendingSave,
        draft: &SessionDraft,
        date: NaiveDate,
    ) -> SessionRecord {
        let record = SessionRecord::from_seconds(draft, pending.duration_secs, date);
        self.phase = TimerPhase::Idle;
        self.elapsed_secs = 0;
        record
    }
}

impl Tick for Stopwatch {
    fn tick(&mut self) -> Option<Event> {
        if self.phase == TimerPhase::Running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        None
    }

    fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }
}
