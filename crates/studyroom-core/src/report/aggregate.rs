use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::session::SessionRecord;

/// Chart lower bound for the duration axis, in minutes.
const MIN_DURATION_CEILING: u64 = 60;
/// Chart lower bound for the pages axis.
const MIN_PAGES_CEILING: u64 = 10;
/// Sessions counted in the "recent" card.
pub const RECENT_SESSIONS: usize = 7;

/// How many distinct study days the per-day series keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    #[default]
    Week,
    Month,
}

impl ReportPeriod {
    pub fn days(self) -> usize {
        match self {
            ReportPeriod::Week => 7,
            ReportPeriod::Month => 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectBreakdown {
    pub subject: String,
    pub duration_min: u64,
    /// Rounded share of the total, 0 when the total is 0.
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub duration_min: u64,
    pub pages: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAggregate {
    pub total_duration_min: u64,
    pub total_pages: u64,
    pub average_daily_min: u64,
    pub per_subject: Vec<SubjectBreakdown>,
    /// Chronological, oldest first.
    pub per_day: Vec<DailyTotal>,
    pub duration_ceiling: u64,
    pub pages_ceiling: u64,
}

/// Totals for a single day or for the most recent sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub sessions: usize,
    pub duration_min: u64,
    pub pages: u64,
}

/// Fold the session list into report figures.
///
/// Only whole minutes are summed; stopwatch remainders are display-only.
pub fn aggregate(sessions: &[SessionRecord], period: ReportPeriod) -> ReportAggregate {
    if sessions.is_empty() {
        return ReportAggregate {
            duration_ceiling: MIN_DURATION_CEILING,
            pages_ceiling: MIN_PAGES_CEILING,
            ..ReportAggregate::default()
        };
    }

    let total_duration_min: u64 = sessions.iter().map(SessionRecord::duration_min).sum();
    let total_pages: u64 = sessions.iter().map(|s| u64::from(s.pages())).sum();

    let days: HashSet<NaiveDate> = sessions.iter().map(SessionRecord::date).collect();
    let average_daily_min = total_duration_min / days.len() as u64;

    let per_subject = subject_breakdown(sessions, total_duration_min);
    let per_day = daily_series(sessions, period.days());

    let duration_ceiling = per_day
        .iter()
        .map(|d| d.duration_min)
        .max()
        .unwrap_or(0)
        .max(MIN_DURATION_CEILING);
    let pages_ceiling = per_day
        .iter()
        .map(|d| d.pages)
        .max()
        .unwrap_or(0)
        .max(MIN_PAGES_CEILING);

    ReportAggregate {
        total_duration_min,
        total_pages,
        average_daily_min,
        per_subject,
        per_day,
        duration_ceiling,
        pages_ceiling,
    }
}

fn subject_breakdown(sessions: &[SessionRecord], total: u64) -> Vec<SubjectBreakdown> {
    // Keep first-seen order so equal durations sort deterministically.
    let mut order: Vec<&str> = Vec::new();
    let mut minutes: HashMap<&str, u64> = HashMap::new();
    for s in sessions {
        let entry = minutes.entry(s.subject()).or_insert_with(|| {
            order.push(s.subject());
            0
        });
        *entry += s.duration_min();
    }

    let mut breakdown: Vec<SubjectBreakdown> = order
        .into_iter()
        .map(|subject| {
            let duration_min = minutes[subject];
            SubjectBreakdown {
                subject: subject.to_string(),
                duration_min,
                percentage: percentage(duration_min, total),
            }
        })
        .collect();
    breakdown.sort_by(|a, b| b.duration_min.cmp(&a.duration_min));
    breakdown
}

fn percentage(part: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u8
}

/// Per-date totals for the most recent `days` distinct dates, oldest first.
pub fn daily_series(sessions: &[SessionRecord], days: usize) -> Vec<DailyTotal> {
    let mut by_date: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for s in sessions {
        let entry = by_date.entry(s.date()).or_default();
        entry.0 += s.duration_min();
        entry.1 += u64::from(s.pages());
    }
    let skip = by_date.len().saturating_sub(days);
    by_date
        .into_iter()
        .skip(skip)
        .map(|(date, (duration_min, pages))| DailyTotal {
            date,
            duration_min,
            pages,
        })
        .collect()
}

/// Sessions recorded on `date`.
pub fn day_summary(sessions: &[SessionRecord], date: NaiveDate) -> Summary {
    summarize(sessions.iter().filter(|s| s.date() == date))
}

/// The newest `count` sessions (the store is newest first).
pub fn recent_summary(sessions: &[SessionRecord], count: usize) -> Summary {
    summarize(sessions.iter().take(count))
}

fn summarize<'a>(sessions: impl Iterator<Item = &'a SessionRecord>) -> Summary {
    sessions.fold(Summary::default(), |mut acc, s| {
        acc.sessions += 1;
        acc.duration_min += s.duration_min();
        acc.pages += u64::from(s.pages());
        acc
    })
}
