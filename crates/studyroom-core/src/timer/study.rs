//! The study timer screen: stopwatch, countdown and manual entry feeding
//! one [`SessionStore`].
//!
//! Only one engine ticks at a time. Starting one stops the other, and
//! [`StudyTimer::suspend`] stops both when the view goes away.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};

use super::driver::{EventSink, TimerDriver};
use super::scheduler::Scheduler;
use super::{Countdown, ManualEntry, PendingSave, ResetRequest, Stopwatch, TimerPhase};
use crate::error::ValidationError;
use crate::events::Event;
use crate::haptics::{Cue, Haptics};
use crate::session::{SessionDraft, SessionRecord, SessionStore};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct StudyTimer {
    stopwatch: TimerDriver<Stopwatch>,
    countdown: TimerDriver<Countdown>,
    haptics: Arc<dyn Haptics>,
}

impl StudyTimer {
    /// Build a timer pair and the channel its events arrive on.
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        haptics: Arc<dyn Haptics>,
        countdown_target_secs: u64,
    ) -> (Self, Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        let cue_haptics = Arc::clone(&haptics);
        let sink: EventSink = Arc::new(move |event: Event| {
            if matches!(event, Event::CountdownExpired { .. }) {
                cue_haptics.vibrate(Cue::CountdownExpired);
            }
            // Receiver may be gone when the front end is shutting down.
            let _ = tx.send(event);
        });

        let timer = Self {
            stopwatch: TimerDriver::new(
                Stopwatch::new(),
                Arc::clone(&scheduler),
                TICK_PERIOD,
                Arc::clone(&sink),
            ),
            countdown: TimerDriver::new(
                Countdown::new(countdown_target_secs),
                scheduler,
                TICK_PERIOD,
                sink,
            ),
            haptics,
        };
        (timer, rx)
    }

    // ── Stopwatch ────────────────────────────────────────────────────

    pub fn start_stopwatch(&mut self) {
        self.countdown.command(|cd| ((), cd.pause()));
        self.stopwatch.command(|sw| ((), sw.start()));
    }

    pub fn stop_stopwatch(&mut self) {
        self.stopwatch.command(|sw| ((), sw.stop()));
    }

    /// Ask to commit the stopwatch. At zero this only emits an
    /// informational event.
    pub fn reset_stopwatch(&mut self) -> ResetRequest {
        let request = self.stopwatch.with(Stopwatch::reset);
        if request == ResetRequest::NothingToSave {
            self.stopwatch.emit(Event::NothingToSave { at: Utc::now() });
        }
        request
    }

    pub fn confirm_stopwatch(
        &mut self,
        pending: PendingSave,
        draft: &SessionDraft,
        date: NaiveDate,
        store: &mut SessionStore,
    ) -> SessionRecord {
        let record = self
            .stopwatch
            .command(|sw| (sw.confirm_reset(pending, draft, date), None));
        self.commit(record, store)
    }

    // ── Countdown ────────────────────────────────────────────────────

    pub fn set_countdown_target(&mut self, target_secs: u64) -> Result<(), ValidationError> {
        self.countdown.command(|cd| (cd.set_target(target_secs), None))
    }

    pub fn start_countdown(&mut self) -> Result<(), ValidationError> {
        self.countdown.command(|cd| match cd.start() {
            Ok(event) => (Ok(()), event),
            Err(e) => (Err(e), None),
        })?;
        if self.countdown.with(Countdown::phase) == TimerPhase::Running {
            self.stopwatch.command(|sw| ((), sw.stop()));
        }
        Ok(())
    }

    pub fn pause_countdown(&mut self) {
        self.countdown.command(|cd| ((), cd.pause()));
    }

    pub fn reset_countdown(&mut self) {
        self.countdown.command(|cd| ((), Some(cd.reset())));
    }

    pub fn countdown_pending(&self) -> Option<PendingSave> {
        self.countdown.with(Countdown::pending_save)
    }

    pub fn confirm_countdown(
        &mut self,
        draft: &SessionDraft,
        date: NaiveDate,
        store: &mut SessionStore,
    ) -> Result<SessionRecord, ValidationError> {
        let record = self
            .countdown
            .command(|cd| (cd.confirm_expiry(draft, date), None))?;
        Ok(self.commit(record, store))
    }

    pub fn dismiss_countdown(&mut self) {
        self.countdown.command(|cd| {
            cd.dismiss_expiry();
            ((), None)
        });
    }

    // ── Manual entry ─────────────────────────────────────────────────

    pub fn save_manual(
        &mut self,
        form: &mut ManualEntry,
        date: NaiveDate,
        store: &mut SessionStore,
    ) -> Result<SessionRecord, ValidationError> {
        let record = form.submit(date)?;
        Ok(self.commit(record, store))
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Stop every tick source. Timers do not count while the view is hidden.
    pub fn suspend(&mut self) {
        self.stopwatch.command(|sw| ((), sw.stop()));
        self.countdown.command(|cd| ((), cd.pause()));
    }

    pub fn stopwatch(&self) -> Stopwatch {
        self.stopwatch.with(Clone::clone)
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown.with(Clone::clone)
    }

    fn commit(&mut self, record: SessionRecord, store: &mut SessionStore) -> SessionRecord {
        store.add(record.clone());
        self.haptics.vibrate(Cue::Saved);
        self.stopwatch.emit(Event::SessionSaved {
            record: record.clone(),
            at: Utc::now(),
        });
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHaptics(Mutex<Vec<Cue>>);

    impl Haptics for RecordingHaptics {
        fn vibrate(&self, cue: Cue) {
            self.0.lock().unwrap().push(cue);
        }
    }

    fn setup(target: u64) -> (StudyTimer, Receiver<Event>, ManualScheduler, Arc<RecordingHaptics>) {
        let sched = ManualScheduler::new();
        let haptics = Arc::new(RecordingHaptics::default());
        let (timer, rx) = StudyTimer::new(Arc::new(sched.clone()), haptics.clone(), target);
        (timer, rx, sched, haptics)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 18).unwrap()
    }

    #[test]
    fn repeated_start_keeps_one_tick_source() {
        let (mut timer, _rx, sched, _) = setup(60);
        timer.start_stopwatch();
        timer.start_stopwatch();
        timer.start_stopwatch();
        assert_eq!(sched.active_sources(), 1);

        sched.advance(5);
        assert_eq!(timer.stopwatch().elapsed_secs(), 5);
    }

    #[test]
    fn starting_one_engine_stops_the_other() {
        let (mut timer, _rx, sched, _) = setup(60);
        timer.start_stopwatch();
        sched.advance(2);
        timer.start_countdown().unwrap();
        assert_eq!(timer.stopwatch().phase(), TimerPhase::Idle);
        assert_eq!(sched.active_sources(), 1);

        sched.advance(10);
        assert_eq!(timer.stopwatch().elapsed_secs(), 2);
        assert_eq!(timer.countdown().remaining_secs(), 50);

        timer.start_stopwatch();
        assert_eq!(timer.countdown().phase(), TimerPhase::Paused);
        assert_eq!(sched.active_sources(), 1);
    }

    #[test]
    fn stopwatch_save_flow() {
        let (mut timer, rx, sched, haptics) = setup(60);
        let mut store = SessionStore::new();

        assert_eq!(timer.reset_stopwatch(), ResetRequest::NothingToSave);
        assert!(store.is_empty());

        timer.start_stopwatch();
        sched.advance(61);
        timer.stop_stopwatch();
        let ResetRequest::Confirm(pending) = timer.reset_stopwatch() else {
            panic!("expected confirmation");
        };
        let record = timer.confirm_stopwatch(pending, &SessionDraft::new("Math", 5), today(), &mut store);

        assert_eq!(record.duration_min(), 1);
        assert_eq!(record.seconds_remainder(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(timer.stopwatch().elapsed_secs(), 0);
        assert_eq!(*haptics.0.lock().unwrap(), vec![Cue::Saved]);

        let events: Vec<Event> = rx.try_iter().collect();
        assert!(events.iter().any(|e| matches!(e, Event::NothingToSave { .. })));
        assert!(events.iter().any(|e| matches!(e, Event::SessionSaved { .. })));
    }

    #[test]
    fn countdown_expiry_releases_tick_source_and_cues() {
        let (mut timer, rx, sched, haptics) = setup(3);
        let mut store = SessionStore::new();

        timer.start_countdown().unwrap();
        sched.advance(3);
        assert_eq!(sched.active_sources(), 0);
        assert!(timer.countdown_pending().is_some());
        assert_eq!(*haptics.0.lock().unwrap(), vec![Cue::CountdownExpired]);

        let record = timer
            .confirm_countdown(&SessionDraft::new("English", 0), today(), &mut store)
            .unwrap();
        assert_eq!(record.total_secs(), 3);
        assert_eq!(timer.countdown().remaining_secs(), 3);
        assert!(rx.try_iter().any(|e| matches!(e, Event::CountdownExpired { .. })));
    }

    #[test]
    fn pause_resume_through_driver() {
        let (mut timer, _rx, sched, _) = setup(60);
        timer.start_countdown().unwrap();
        sched.advance(18);
        timer.pause_countdown();
        assert_eq!(sched.active_sources(), 0);
        sched.advance(5);
        assert_eq!(timer.countdown().remaining_secs(), 42);
        timer.start_countdown().unwrap();
        sched.advance(1);
        assert_eq!(timer.countdown().remaining_secs(), 41);
    }

    #[test]
    fn suspend_stops_everything() {
        let (mut timer, _rx, sched, _) = setup(60);
        timer.start_countdown().unwrap();
        timer.suspend();
        assert_eq!(sched.active_sources(), 0);
        assert_eq!(timer.countdown().phase(), TimerPhase::Paused);
    }

    #[test]
    fn manual_save_goes_to_store() {
        let (mut timer, _rx, _sched, haptics) = setup(60);
        let mut store = SessionStore::new();
        let mut form = ManualEntry::new("Science", "09:00", "10:30", "7");
        let record = timer.save_manual(&mut form, today(), &mut store).unwrap();
        assert_eq!(record.duration_min(), 90);
        assert_eq!(store.sessions()[0].id(), record.id());
        assert_eq!(haptics.0.lock().unwrap().len(), 1);

        let mut bad = ManualEntry::new("Science", "10:30", "09:00", "");
        assert!(timer.save_manual(&mut bad, today(), &mut store).is_err());
        assert_eq!(store.len(), 1);
    }
}
