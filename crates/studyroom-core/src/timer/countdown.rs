//! Down-counting study timer with pause/resume.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> (zero) -> Idle + expired
//! ```
//!
//! Remaining time only returns to the target on an explicit [`Countdown::reset`]
//! or after the expiry prompt is answered. Changing the target never touches
//! the remaining value, so an expired run records the seconds it actually
//! counted down rather than whatever target is set at expiry.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{PendingSave, Tick, TimerPhase};
use crate::error::ValidationError;
use crate::events::Event;
use crate::session::{SessionDraft, SessionRecord};

/// 25 minutes.
pub const DEFAULT_TARGET_SECS: u64 = 25 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    phase: TimerPhase,
    target_secs: u64,
    remaining_secs: u64,
    /// Seconds counted down since the last reset or expiry prompt.
    #[serde(default)]
    counted_secs: u64,
    /// Duration owed to the save prompt once the countdown hit zero.
    #[serde(default)]
    expired_secs: Option<u64>,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_SECS)
    }
}

impl Countdown {
    pub fn new(target_secs: u64) -> Self {
        Self {
            phase: TimerPhase::Idle,
            target_secs,
            remaining_secs: target_secs,
            counted_secs: 0,
            expired_secs: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn target_secs(&self) -> u64 {
        self.target_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Some when the countdown reached zero and waits for save/dismiss.
    pub fn pending_save(&self) -> Option<PendingSave> {
        self.expired_secs
            .map(|duration_secs| PendingSave { duration_secs })
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the target. Only allowed while idle or paused.
    pub fn set_target(&mut self, target_secs: u64) -> Result<(), ValidationError> {
        if self.phase == TimerPhase::Running {
            return Err(ValidationError::TargetLocked);
        }
        self.target_secs = target_secs;
        Ok(())
    }

    /// Start, or resume from the paused remaining value.
    ///
    /// Returns `Ok(None)` when already running.
    pub fn start(&mut self) -> Result<Option<Event>, ValidationError> {
        if self.phase == TimerPhase::Running {
            return Ok(None);
        }
        if self.expired_secs.is_some() {
            return Err(ValidationError::WrongPhase {
                action: "start",
                phase: "waiting for the save prompt".into(),
            });
        }
        if self.target_secs == 0 || self.remaining_secs == 0 {
            return Err(ValidationError::ZeroTarget);
        }
        let resumed = self.phase == TimerPhase::Paused;
        self.phase = TimerPhase::Running;
        Ok(Some(Event::CountdownStarted {
            remaining_secs: self.remaining_secs,
            resumed,
            at: Utc::now(),
        }))
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.phase = TimerPhase::Paused;
        Some(Event::CountdownPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Clear pause state and restore the full target.
    pub fn reset(&mut self) -> Event {
        self.phase = TimerPhase::Idle;
        self.remaining_secs = self.target_secs;
        self.counted_secs = 0;
        self.expired_secs = None;
        Event::CountdownReset {
            target_secs: self.target_secs,
            at: Utc::now(),
        }
    }

    /// Answer the expiry prompt with "save".
    pub fn confirm_expiry(
        &mut self,
        draft: &SessionDraft,
        date: NaiveDate,
    ) -> Result<SessionRecord, ValidationError> {
        let duration_secs = self.expired_secs.take().ok_or(ValidationError::WrongPhase {
            action: "save",
            phase: "the countdown has not finished".into(),
        })?;
        self.remaining_secs = self.target_secs;
        Ok(SessionRecord::from_seconds(draft, duration_secs, date))
    }

    /// Answer the expiry prompt without saving.
    pub fn dismiss_expiry(&mut self) {
        if self.expired_secs.take().is_some() {
            self.remaining_secs = self.target_secs;
        }
    }
}

impl Tick for Countdown {
    fn tick(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.counted_secs += 1;
        if self.remaining_secs > 0 {
            return None;
        }
        let duration_secs = std::mem::take(&mut self.counted_secs);
        self.phase = TimerPhase::Idle;
        self.expired_secs = Some(duration_secs);
        tracing::debug!(duration_secs, target_secs = self.target_secs, "countdown expired");
        Some(Event::CountdownExpired {
            duration_secs,
            at: Utc::now(),
        })
    }

    fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 18).unwrap()
    }

    #[test]
    fn zero_target_is_rejected() {
        let mut cd = Countdown::new(0);
        assert!(matches!(cd.start(), Err(ValidationError::ZeroTarget)));
        assert_eq!(cd.phase(), TimerPhase::Idle);
    }

    #[test]
    fn pause_preserves_remaining_exactly() {
        let mut cd = Countdown::new(60);
        cd.start().unwrap();
        for _ in 0..18 {
            cd.tick();
        }
        assert_eq!(cd.remaining_secs(), 42);

        cd.pause();
        cd.tick();
        cd.tick();
        assert_eq!(cd.remaining_secs(), 42);

        let ev = cd.start().unwrap();
        assert!(matches!(
            ev,
            Some(Event::CountdownStarted { remaining_secs: 42, resumed: true, .. })
        ));
        assert_eq!(cd.remaining_secs(), 42);
        cd.tick();
        assert_eq!(cd.remaining_secs(), 41);
    }

    #[test]
    fn target_locked_while_running() {
        let mut cd = Countdown::new(60);
        cd.start().unwrap();
        assert_eq!(cd.set_target(120), Err(ValidationError::TargetLocked));
        cd.pause();
        assert!(cd.set_target(120).is_ok());
    }

    #[test]
    fn set_target_does_not_touch_remaining() {
        let mut cd = Countdown::new(60);
        cd.set_target(600).unwrap();
        assert_eq!(cd.remaining_secs(), 60);
        cd.reset();
        assert_eq!(cd.remaining_secs(), 600);
    }

    #[test]
    fn expiry_stops_and_waits_for_save() {
        let mut cd = Countdown::new(3);
        cd.start().unwrap();
        assert!(cd.tick().is_none());
        assert!(cd.tick().is_none());
        let ev = cd.tick();
        assert!(matches!(ev, Some(Event::CountdownExpired { duration_secs: 3, .. })));
        assert!(!cd.is_running());
        assert_eq!(cd.remaining_secs(), 0);

        // Further ticks change nothing.
        assert!(cd.tick().is_none());
        assert_eq!(cd.remaining_secs(), 0);
        assert!(cd.start().is_err());

        let record = cd.confirm_expiry(&SessionDraft::new("Math", 2), today()).unwrap();
        assert_eq!(record.total_secs(), 3);
        assert_eq!(cd.remaining_secs(), 3);
        assert!(cd.pending_save().is_none());
    }

    #[test]
    fn dismiss_restores_target_without_record() {
        let mut cd = Countdown::new(1);
        cd.start().unwrap();
        cd.tick();
        assert!(cd.pending_save().is_some());
        cd.dismiss_expiry();
        assert_eq!(cd.remaining_secs(), 1);
        assert!(cd.confirm_expiry(&SessionDraft::default(), today()).is_err());
    }

    #[test]
    fn retarget_while_paused_records_counted_time() {
        let mut cd = Countdown::new(60);
        cd.start().unwrap();
        for _ in 0..18 {
            cd.tick();
        }
        cd.pause();
        cd.set_target(3600).unwrap();
        cd.start().unwrap();
        let mut ticks = 18;
        while cd.is_running() {
            cd.tick();
            ticks += 1;
        }
        assert_eq!(ticks, 60);
        assert_eq!(cd.pending_save().map(|p| p.duration_secs), Some(60));

        let record = cd.confirm_expiry(&SessionDraft::new("Math", 0), today()).unwrap();
        assert_eq!(record.total_secs(), 60);
        // The new target applies from here on.
        assert_eq!(cd.remaining_secs(), 3600);
    }

    #[test]
    fn retarget_while_idle_records_counted_time() {
        let mut cd = Countdown::new(5);
        cd.set_target(600).unwrap();
        cd.start().unwrap();
        while cd.is_running() {
            cd.tick();
        }
        let record = cd.confirm_expiry(&SessionDraft::default(), today()).unwrap();
        assert_eq!(record.total_secs(), 5);
    }

    #[test]
    fn reset_discards_counted_time() {
        let mut cd = Countdown::new(10);
        cd.start().unwrap();
        cd.tick();
        cd.tick();
        cd.reset();
        cd.start().unwrap();
        while cd.is_running() {
            cd.tick();
        }
        assert_eq!(cd.pending_save().map(|p| p.duration_secs), Some(10));
    }

    #[test]
    fn remaining_never_increases_while_running() {
        let mut cd = Countdown::new(30);
        cd.start().unwrap();
        let mut last = cd.remaining_secs();
        while cd.is_running() {
            cd.tick();
            assert!(cd.remaining_secs() <= last);
            last = cd.remaining_secs();
        }
        assert_eq!(last, 0);
    }
}
