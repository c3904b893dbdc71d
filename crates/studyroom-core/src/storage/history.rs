//! Persistence for sessions, memos and answer history.
//!
//! Each collection is read once when a command starts and written back
//! whole after every mutation.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::database::Database;
use crate::ai::AnswerHistory;
use crate::error::StorageError;
use crate::memo::MemoBook;
use crate::session::SessionStore;

pub const SESSIONS_KEY: &str = "study_sessions";
pub const MEMOS_KEY: &str = "study_memos";
pub const ANSWER_HISTORY_KEY: &str = "answer_history";

pub struct HistoryStore {
    db: Database,
}

impl HistoryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the store in the default data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn load_sessions(&self) -> Result<SessionStore, StorageError> {
        self.load(SESSIONS_KEY)
    }

    pub fn save_sessions(&self, sessions: &SessionStore) -> Result<(), StorageError> {
        self.save(SESSIONS_KEY, sessions)
    }

    pub fn load_memos(&self) -> Result<MemoBook, StorageError> {
        self.load(MEMOS_KEY)
    }

    pub fn save_memos(&self, memos: &MemoBook) -> Result<(), StorageError> {
        self.save(MEMOS_KEY, memos)
    }

    pub fn load_answers(&self) -> Result<AnswerHistory, StorageError> {
        self.load(ANSWER_HISTORY_KEY)
    }

    pub fn save_answers(&self, history: &AnswerHistory) -> Result<(), StorageError> {
        self.save(ANSWER_HISTORY_KEY, history)
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StorageError> {
        match self.db.kv_get(key)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| StorageError::CorruptBlob {
                key: key.to_string(),
                message: e.to_string(),
            }),
            None => Ok(T::default()),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::CorruptBlob {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.db.kv_set(key, &json)?;
        tracing::debug!(key, bytes = json.len(), "collection saved");
        Ok(())
    }
}
