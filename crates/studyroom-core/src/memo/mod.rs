//! Study memos: short notes tagged by subject and free-form tags.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Field, ValidationError};
use crate::session::FALLBACK_SUBJECT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: String,
    pub text: String,
    pub subject: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    /// Attached picture, stored as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

/// Unvalidated memo input.
#[derive(Debug, Clone, Default)]
pub struct MemoDraft {
    pub text: String,
    pub subject: String,
    /// Comma separated.
    pub tags: String,
    pub image_uri: Option<String>,
}

impl MemoDraft {
    pub fn to_memo(&self, date: NaiveDate) -> Result<Memo, ValidationError> {
        let text = self.text.trim();
        let image_uri = self
            .image_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty());
        if text.is_empty() && image_uri.is_none() {
            return Err(ValidationError::field(Field::Content, "memo is empty"));
        }
        let subject = match self.subject.trim() {
            "" => FALLBACK_SUBJECT,
            s => s,
        };
        Ok(Memo {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            subject: subject.to_string(),
            date,
            tags: parse_tags(&self.tags),
            image_uri: image_uri.map(str::to_string),
        })
    }
}

pub fn parse_tags(list: &str) -> Vec<String> {
    list.split([',', '、'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Conjunctive memo filter. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct MemoFilter {
    pub subject: Option<String>,
    pub tag: Option<String>,
    pub keyword: Option<String>,
}

impl MemoFilter {
    fn matches(&self, memo: &Memo) -> bool {
        let subject_ok = self
            .subject
            .as_deref()
            .map_or(true, |s| memo.subject.eq_ignore_ascii_case(s.trim()));
        let tag_ok = self
            .tag
            .as_deref()
            .map_or(true, |t| memo.tags.iter().any(|m| m.eq_ignore_ascii_case(t.trim())));
        let keyword_ok = self.keyword.as_deref().map_or(true, |k| {
            let k = k.trim().to_lowercase();
            memo.text.to_lowercase().contains(&k) || memo.subject.to_lowercase().contains(&k)
        });
        subject_ok && tag_ok && keyword_ok
    }
}

/// Memos, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoBook {
    memos: Vec<Memo>,
}

impl MemoBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_memos(memos: Vec<Memo>) -> Self {
        Self { memos }
    }

    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    pub fn add(&mut self, draft: &MemoDraft, date: NaiveDate) -> Result<&Memo, ValidationError> {
        let memo = draft.to_memo(date)?;
        tracing::debug!(id = %memo.id, subject = %memo.subject, "memo added");
        self.memos.insert(0, memo);
        Ok(&self.memos[0])
    }

    pub fn remove(&mut self, id: &str) -> Result<Memo, ValidationError> {
        let pos = self
            .memos
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| ValidationError::NotFound(id.to_string()))?;
        Ok(self.memos.remove(pos))
    }

    pub fn filter(&self, filter: &MemoFilter) -> Vec<&Memo> {
        self.memos.iter().filter(|m| filter.matches(m)).collect()
    }
}
