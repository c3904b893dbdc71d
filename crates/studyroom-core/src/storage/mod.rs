mod config;
pub mod database;
pub mod history;

pub use config::{AiConfig, Config, NotificationsConfig, QuizSettings, ReportConfig, TimerConfig};
pub use database::Database;
pub use history::{HistoryStore, ANSWER_HISTORY_KEY, MEMOS_KEY, SESSIONS_KEY};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/studyroom[-dev]/` based on STUDYROOM_ENV.
///
/// Set STUDYROOM_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYROOM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyroom-dev")
    } else {
        base_dir.join("studyroom")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
