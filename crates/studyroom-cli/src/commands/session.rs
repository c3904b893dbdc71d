use clap::Subcommand;
use studyroom_core::haptics::{Cue, Haptics, LogHaptics};
use studyroom_core::{Config, HistoryStore, ManualEntry, ValidationError};

use super::{print_json, today};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record a session from start and end times (HH:MM, same day)
    Add {
        /// Subject
        #[arg(long)]
        subject: String,
        /// Start time, HH:MM
        #[arg(long)]
        start: String,
        /// End time, HH:MM
        #[arg(long)]
        end: String,
        /// Pages studied
        #[arg(long, default_value = "")]
        pages: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },
    /// List sessions, newest first
    List {
        /// Only the first N sessions
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Delete a session by id
    Remove {
        /// Session id
        id: String,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let history = HistoryStore::open()?;
    let mut sessions = history.load_sessions()?;

    match action {
        SessionAction::Add {
            subject,
            start,
            end,
            pages,
            date,
        } => {
            let mut form = ManualEntry::new(subject, start, end, pages);
            let record = form.submit(date.unwrap_or_else(today))?;
            sessions.add(record.clone());
            history.save_sessions(&sessions)?;
            if Config::load_or_default().notifications.vibration {
                LogHaptics.vibrate(Cue::Saved);
            }
            print_json(&record)?;
        }
        SessionAction::List { limit } => {
            let all = sessions.sessions();
            let shown = &all[..limit.unwrap_or(all.len()).min(all.len())];
            print_json(&shown)?;
        }
        SessionAction::Remove { id } => {
            let removed = sessions
                .remove(&id)
                .ok_or(ValidationError::NotFound(id))?;
            history.save_sessions(&sessions)?;
            print_json(&removed)?;
        }
    }
    Ok(())
}
