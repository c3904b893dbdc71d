//! Manual session entry from wall-clock start/end times.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};
use crate::session::{SessionDraft, SessionRecord};

/// Text fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub subject: String,
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`
    pub end: String,
    /// Empty means zero.
    pub pages: String,
}

impl ManualEntry {
    pub fn new(
        subject: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        pages: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            start: start.into(),
            end: end.into(),
            pages: pages.into(),
        }
    }

    /// Validate without touching the form.
    pub fn to_record(&self, date: NaiveDate) -> Result<SessionRecord, ValidationError> {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::field(Field::Subject, "subject is required"));
        }
        let duration_min = duration_between(&self.start, &self.end)?;
        let pages = parse_pages(&self.pages)?;
        Ok(SessionRecord::from_minutes(
            &SessionDraft::new(subject, pages),
            duration_min,
            date,
        ))
    }

    /// Validate, build the record and clear the form.
    ///
    /// On error the form keeps its contents so the user can fix the field.
    pub fn submit(&mut self, date: NaiveDate) -> Result<SessionRecord, ValidationError> {
        let record = self.to_record(date)?;
        *self = Self::default();
        Ok(record)
    }
}

/// Parse `HH:MM`: exactly two colon-separated numeric parts forming a clock time.
pub fn parse_clock(text: &str, field: Field) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::field(field, format!("expected HH:MM, got {text:?}"));

    let mut parts = text.trim().split(':');
    let (Some(h), Some(m), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !numeric(h) || !numeric(m) {
        return Err(invalid());
    }
    let hour: u32 = h.parse().map_err(|_| invalid())?;
    let minute: u32 = m.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Minutes from `start` to `end` on the same day. Must be positive.
pub fn duration_between(start: &str, end: &str) -> Result<u64, ValidationError> {
    let s = parse_clock(start, Field::StartTime)?;
    let e = parse_clock(end, Field::EndTime)?;
    let start_min = i64::from(s.hour() * 60 + s.minute());
    let end_min = i64::from(e.hour() * 60 + e.minute());
    let diff = end_min - start_min;
    if diff <= 0 {
        return Err(ValidationError::InvalidTimeRange {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        });
    }
    Ok(diff as u64)
}

fn parse_pages(text: &str) -> Result<u32, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<u32>()
        .map_err(|_| ValidationError::field(Field::Pages, format!("not a page count: {text:?}")))
}
