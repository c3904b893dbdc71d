//! Completed study sessions and the in-memory store that owns them.
//!
//! Records are immutable once built. The store only prepends new records or
//! filters existing ones out; nothing is edited in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used when a session is saved without a subject.
pub const FALLBACK_SUBJECT: &str = "Other";

/// One completed study interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct SessionRecord {
    id: String,
    subject: String,
    duration_min: u64,
    /// Seconds past the last whole minute. Only stopwatch sessions set this.
    seconds_remainder: u8,
    pages: u32,
    date: NaiveDate,
}

/// Stored form of a record, checked before it becomes a [`SessionRecord`].
#[derive(Deserialize)]
struct StoredRecord {
    id: String,
    subject: String,
    duration_min: u64,
    #[serde(default)]
    seconds_remainder: u8,
    #[serde(default)]
    pages: u32,
    date: NaiveDate,
}

impl TryFrom<StoredRecord> for SessionRecord {
    type Error = String;

    fn try_from(raw: StoredRecord) -> Result<Self, Self::Error> {
        if raw.seconds_remainder > 59 {
            return Err(format!(
                "session {}: seconds_remainder {} is out of range 0-59",
                raw.id, raw.seconds_remainder
            ));
        }
        if raw.id.trim().is_empty() {
            return Err("session without an id".to_string());
        }
        Ok(Self {
            id: raw.id,
            subject: raw.subject,
            duration_min: raw.duration_min,
            seconds_remainder: raw.seconds_remainder,
            pages: raw.pages,
            date: raw.date,
        })
    }
}

/// Subject and page count supplied when a timer result is confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub subject: String,
    pub pages: u32,
}

impl SessionDraft {
    pub fn new(subject: impl Into<String>, pages: u32) -> Self {
        Self {
            subject: subject.into(),
            pages,
        }
    }
}

impl SessionRecord {
    /// Build a record from a raw number of seconds.
    ///
    /// The seconds are split into whole minutes plus a 0-59 remainder.
    pub fn from_seconds(draft: &SessionDraft, total_secs: u64, date: NaiveDate) -> Self {
        Self::build(
            draft,
            total_secs / 60,
            (total_secs % 60) as u8,
            date,
        )
    }

    /// Build a record from whole minutes (manual entry).
    pub fn from_minutes(draft: &SessionDraft, duration_min: u64, date: NaiveDate) -> Self {
        Self::build(draft, duration_min, 0, date)
    }

    fn build(draft: &SessionDraft, duration_min: u64, seconds_remainder: u8, date: NaiveDate) -> Self {
        let subject = draft.subject.trim();
        Self {
            id: Uuid::new_v4().to_string(),
            subject: if subject.is_empty() {
                FALLBACK_SUBJECT.to_string()
            } else {
                subject.to_string()
            },
            duration_min,
            seconds_remainder,
            pages: draft.pages,
            date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn duration_min(&self) -> u64 {
        self.duration_min
    }

    pub fn seconds_remainder(&self) -> u8 {
        self.seconds_remainder
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Full duration in seconds (`minutes * 60 + remainder`).
    pub fn total_secs(&self) -> u64 {
        self.duration_min * 60 + u64::from(self.seconds_remainder)
    }
}

/// Ordered list of completed sessions, newest first.
///
/// Owned by the application and handed to consumers by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionStore {
    records: Vec<SessionRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    /// Prepend a record and return the updated view.
    pub fn add(&mut self, record: SessionRecord) -> &[SessionRecord] {
        tracing::debug!(id = %record.id, subject = %record.subject, minutes = record.duration_min, "session added");
        self.records.insert(0, record);
        &self.records
    }

    /// Remove a record by id. Returns the removed record, if any.
    pub fn remove(&mut self, id: &str) -> Option<SessionRecord> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&SessionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn sessions(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
