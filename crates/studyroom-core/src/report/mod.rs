//! Study report figures derived from the session list.
//!
//! Everything here is a pure fold over `&[SessionRecord]`; nothing is cached.

mod aggregate;
pub mod format;

pub use aggregate::{
    aggregate, daily_series, day_summary, recent_summary, DailyTotal, ReportAggregate,
    ReportPeriod, SubjectBreakdown, Summary, RECENT_SESSIONS,
};
