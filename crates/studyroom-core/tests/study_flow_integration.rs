//! Integration tests for a study day.
//!
//! Runs the timers on a deterministic scheduler, persists the resulting
//! sessions through SQLite and checks the report built from them.

use std::sync::Arc;

use chrono::NaiveDate;
use studyroom_core::report::{day_summary, ReportPeriod};
use studyroom_core::timer::{ManualScheduler, ResetRequest};
use studyroom_core::{
    aggregate, Database, HistoryStore, ManualEntry, NoHaptics, SessionDraft, StudyTimer,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

#[test]
fn test_full_study_day_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("studyroom.db");
    let history = HistoryStore::new(Database::open_path(&db_path).unwrap());
    let mut sessions = history.load_sessions().unwrap();

    let sched = ManualScheduler::new();
    let (mut timer, _events) = StudyTimer::new(Arc::new(sched.clone()), Arc::new(NoHaptics), 1_800);

    // 40 minutes of math on the stopwatch, paused once.
    timer.start_stopwatch();
    sched.advance(1_500);
    timer.stop_stopwatch();
    sched.advance(300);
    timer.start_stopwatch();
    sched.advance(900);
    let ResetRequest::Confirm(pending) = timer.reset_stopwatch() else {
        panic!("stopwatch should have time to save");
    };
    timer.confirm_stopwatch(pending, &SessionDraft::new("Math", 8), day(5), &mut sessions);
    history.save_sessions(&sessions).unwrap();

    // A full 30 minute countdown of English.
    timer.start_countdown().unwrap();
    sched.advance(1_800);
    assert!(timer.countdown_pending().is_some());
    timer
        .confirm_countdown(&SessionDraft::new("English", 4), day(5), &mut sessions)
        .unwrap();
    history.save_sessions(&sessions).unwrap();

    // Yesterday's reading, entered by hand.
    let mut form = ManualEntry::new("Math", "19:00", "19:30", "");
    timer.save_manual(&mut form, day(4), &mut sessions).unwrap();
    history.save_sessions(&sessions).unwrap();
    timer.suspend();

    // Reload from disk as a fresh process would.
    let reloaded = HistoryStore::new(Database::open_path(&db_path).unwrap())
        .load_sessions()
        .unwrap();
    assert_eq!(reloaded, sessions);
    assert_eq!(reloaded.len(), 3);

    let report = aggregate(reloaded.sessions(), ReportPeriod::Week);
    assert_eq!(report.total_duration_min, 100);
    assert_eq!(report.total_pages, 12);
    assert_eq!(report.per_subject[0].subject, "Math");
    assert_eq!(report.per_subject[0].duration_min, 70);
    assert_eq!(report.per_subject[0].percentage, 70);
    assert_eq!(report.per_subject[1].percentage, 30);
    assert_eq!(report.per_day.len(), 2);
    assert_eq!(report.per_day[0].date, day(4));

    let today = day_summary(reloaded.sessions(), day(5));
    assert_eq!(today.sessions, 2);
    assert_eq!(today.duration_min, 70);
}

#[test]
fn test_dismissed_countdown_leaves_no_record() {
    let sched = ManualScheduler::new();
    let (mut timer, _events) = StudyTimer::new(Arc::new(sched.clone()), Arc::new(NoHaptics), 60);
    let history = HistoryStore::new(Database::open_memory().unwrap());
    let sessions = history.load_sessions().unwrap();

    timer.start_countdown().unwrap();
    sched.advance(60);
    timer.dismiss_countdown();

    assert!(timer.countdown_pending().is_none());
    assert_eq!(timer.countdown().remaining_secs(), 60);
    assert!(sessions.is_empty());
    assert_eq!(sched.active_sources(), 0);
}
