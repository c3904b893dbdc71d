//! Time-attack quiz.
//!
//! ## State Transitions
//!
//! ```text
//! Title -> Ready (short countdown) -> Running -> Results
//!   ^                                              |
//!   +------------------- reset --------------------+
//! ```
//!
//! One countdown is shared by every question. Running out of time or
//! answering the last question both end the game.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bank::Question;
use super::normalize::answers_match;
use crate::error::{Field, ValidationError};
use crate::events::Event;
use crate::timer::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizPhase {
    Title,
    Ready,
    Running,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Time for the whole question set.
    pub total_secs: u64,
    /// "3, 2, 1" before the first question.
    pub ready_secs: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            total_secs: 180,
            ready_secs: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u32,
    pub question_text: String,
    pub correct_answer: String,
    pub user_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    TimeUp,
    AllAnswered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResults {
    pub reason: FinishReason,
    pub answers: Vec<AnswerRecord>,
    pub correct: usize,
    pub question_count: usize,
    /// Rounded share of correct answers over the full question set.
    pub score_pct: u8,
    pub elapsed_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizEngine {
    bank: Vec<Question>,
    config: QuizConfig,
    phase: QuizPhase,
    questions: Vec<Question>,
    index: usize,
    ready_left: u64,
    remaining_secs: u64,
    answers: Vec<AnswerRecord>,
    finish: Option<(FinishReason, u64)>,
}

impl QuizEngine {
    pub fn new(bank: Vec<Question>, config: QuizConfig) -> Self {
        Self {
            bank,
            config,
            phase: QuizPhase::Title,
            questions: Vec::new(),
            index: 0,
            ready_left: config.ready_secs,
            remaining_secs: config.total_secs,
            answers: Vec::new(),
            finish: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn ready_left(&self) -> u64 {
        self.ready_left
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Zero-based position in the shuffled set.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Running => self.questions.get(self.index),
            _ => None,
        }
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn results(&self) -> Option<QuizResults> {
        let (reason, elapsed_secs) = self.finish?;
        let correct = self.answers.iter().filter(|a| a.is_correct).count();
        let question_count = self.questions.len();
        let score_pct = if question_count == 0 {
            0
        } else {
            ((correct as f64 / question_count as f64) * 100.0).round() as u8
        };
        Some(QuizResults {
            reason,
            answers: self.answers.clone(),
            correct,
            question_count,
            score_pct,
            elapsed_secs,
        })
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Shuffle the bank and enter the ready countdown.
    pub fn begin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Event, ValidationError> {
        if self.phase != QuizPhase::Title {
            return Err(self.wrong_phase("begin"));
        }
        if self.bank.is_empty() {
            return Err(ValidationError::field(Field::Question, "question bank is empty"));
        }
        let mut questions = self.bank.clone();
        questions.shuffle(rng);
        self.questions = questions;
        self.index = 0;
        self.answers.clear();
        self.remaining_secs = self.config.total_secs;
        self.ready_left = self.config.ready_secs;
        self.finish = None;

        if self.ready_left == 0 {
            Ok(self.enter(QuizPhase::Running))
        } else {
            Ok(self.enter(QuizPhase::Ready))
        }
    }

    /// Judge an answer for the current question and move on.
    ///
    /// Returns the judged record and, when this was the last question, the
    /// phase change to `Results`.
    pub fn submit(&mut self, answer: &str) -> Result<(AnswerRecord, Option<Event>), ValidationError> {
        if self.phase != QuizPhase::Running {
            return Err(self.wrong_phase("answer"));
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ValidationError::field(Field::Answer, "answer is empty"));
        }
        let question = self
            .questions
            .get(self.index)
            .ok_or_else(|| self.wrong_phase("answer"))?;

        let record = AnswerRecord {
            question_id: question.id,
            question_text: question.text.clone(),
            correct_answer: question.answer.clone(),
            user_answer: answer.to_string(),
            is_correct: answers_match(answer, &question.answer),
        };
        self.answers.push(record.clone());
        self.index += 1;

        let event = if self.index >= self.questions.len() {
            let elapsed = self.config.total_secs - self.remaining_secs;
            self.finish = Some((FinishReason::AllAnswered, elapsed));
            Some(self.enter(QuizPhase::Results))
        } else {
            None
        };
        Ok((record, event))
    }

    /// Back to the title screen, discarding the current game.
    pub fn reset(&mut self) -> Event {
        self.questions.clear();
        self.index = 0;
        self.answers.clear();
        self.remaining_secs = self.config.total_secs;
        self.ready_left = self.config.ready_secs;
        self.finish = None;
        self.enter(QuizPhase::Title)
    }

    fn enter(&mut self, phase: QuizPhase) -> Event {
        tracing::debug!(from = ?self.phase, to = ?phase, "quiz phase");
        self.phase = phase;
        Event::QuizPhaseChanged {
            phase,
            at: Utc::now(),
        }
    }

    fn wrong_phase(&self, action: &'static str) -> ValidationError {
        ValidationError::WrongPhase {
            action,
            phase: format!("{:?}", self.phase).to_lowercase(),
        }
    }
}

impl Tick for QuizEngine {
    fn tick(&mut self) -> Option<Event> {
        match self.phase {
            QuizPhase::Ready => {
                self.ready_left = self.ready_left.saturating_sub(1);
                (self.ready_left == 0).then(|| self.enter(QuizPhase::Running))
            }
            QuizPhase::Running => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs > 0 {
                    return None;
                }
                self.finish = Some((FinishReason::TimeUp, self.config.total_secs));
                Some(self.enter(QuizPhase::Results))
            }
            QuizPhase::Title | QuizPhase::Results => None,
        }
    }

    fn is_running(&self) -> bool {
        matches!(self.phase, QuizPhase::Ready | QuizPhase::Running)
    }
}
