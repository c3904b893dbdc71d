use clap::{Subcommand, ValueEnum};
use serde_json::json;
use studyroom_core::report::{
    daily_series, day_summary, recent_summary, ReportPeriod, RECENT_SESSIONS,
};
use studyroom_core::{aggregate, Config, HistoryStore};

use super::{print_json, today};

#[derive(Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Week,
    Month,
}

impl From<PeriodArg> for ReportPeriod {
    fn from(p: PeriodArg) -> Self {
        match p {
            PeriodArg::Week => ReportPeriod::Week,
            PeriodArg::Month => ReportPeriod::Month,
        }
    }
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Totals, per-subject breakdown and per-day series
    Summary {
        /// Defaults to report.default_period
        #[arg(long, value_enum)]
        period: Option<PeriodArg>,
    },
    /// Today's totals and the most recent sessions
    Today,
    /// Per-day totals for the last N study days
    Daily {
        #[arg(long, default_value = "7")]
        days: usize,
    },
}

pub fn run(action: ReportAction) -> Result<(), Box<dyn std::error::Error>> {
    let history = HistoryStore::open()?;
    let sessions = history.load_sessions()?;

    match action {
        ReportAction::Summary { period } => {
            let period = period
                .map(ReportPeriod::from)
                .unwrap_or(Config::load_or_default().report.default_period);
            print_json(&aggregate(sessions.sessions(), period))?;
        }
        ReportAction::Today => {
            print_json(&json!({
                "today": day_summary(sessions.sessions(), today()),
                "recent": recent_summary(sessions.sessions(), RECENT_SESSIONS),
            }))?;
        }
        ReportAction::Daily { days } => {
            print_json(&daily_series(sessions.sessions(), days))?;
        }
    }
    Ok(())
}
