//! Question answering and the answer history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::client::TextGenerator;
use super::prompt::answer_prompt;
use crate::error::{CoreError, Field, ValidationError};
use crate::parse::AnswerSheet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerHistoryItem {
    pub id: String,
    pub question: String,
    /// Model output as received.
    pub answer: String,
    pub sheet: AnswerSheet,
    pub created_at: DateTime<Utc>,
}

/// Answered questions, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerHistory {
    items: Vec<AnswerHistoryItem>,
}

impl AnswerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<AnswerHistoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[AnswerHistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: AnswerHistoryItem) {
        self.items.insert(0, item);
    }

    pub fn remove(&mut self, id: &str) -> Option<AnswerHistoryItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Case-insensitive match on the answered subject or the question text.
    /// A blank keyword matches everything.
    pub fn search(&self, keyword: &str) -> Vec<&AnswerHistoryItem> {
        let keyword = keyword.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                keyword.is_empty()
                    || item.question.to_lowercase().contains(&keyword)
                    || item
                        .sheet
                        .subject
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&keyword))
            })
            .collect()
    }
}

pub struct QuestionAnswerer<G> {
    generator: G,
}

impl<G: TextGenerator> QuestionAnswerer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Ask the model and record the answer. The history is only touched
    /// once the reply has been parsed.
    pub async fn ask(
        &self,
        question: &str,
        history: &mut AnswerHistory,
    ) -> Result<AnswerHistoryItem, CoreError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ValidationError::field(Field::Question, "question is empty").into());
        }

        let raw = self.generator.generate(&answer_prompt(question)).await?;
        let sheet = AnswerSheet::parse(&raw)?;
        let item = AnswerHistoryItem {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer: raw,
            sheet,
            created_at: Utc::now(),
        };
        tracing::info!(id = %item.id, subject = ?item.sheet.subject, "question answered");
        history.push(item.clone());
        Ok(item)
    }
}
