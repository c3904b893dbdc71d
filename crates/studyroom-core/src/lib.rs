//! # Studyroom Core Library
//!
//! This library provides the core logic for Studyroom, a study companion
//! that times study sessions, reports on them, runs a time-attack quiz and
//! answers questions through a generative-AI endpoint. Every operation is
//! available through the standalone CLI binary.
//!
//! ## Architecture
//!
//! - **Timers**: Stopwatch and countdown state machines advanced by `tick()`,
//!   driven by an explicit [`Scheduler`] that can be cancelled at any time
//! - **Sessions**: An append-only list of completed study sessions
//! - **Reports**: Pure aggregation over the session list
//! - **Quiz**: Time-attack question engine with loose answer matching
//! - **AI**: Gemini client, prompt builders and a tagged-line reply parser
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`StudyTimer`]: Stopwatch + countdown pair with save prompts
//! - [`SessionStore`]: Session history, newest first
//! - [`QuizEngine`]: Quiz state machine
//! - [`QuestionAnswerer`]: Question → parsed answer → history
//! - [`HistoryStore`]: Collection persistence
//! - [`Config`]: Application configuration management

pub mod ai;
pub mod error;
pub mod events;
pub mod haptics;
pub mod memo;
pub mod parse;
pub mod quiz;
pub mod report;
pub mod session;
pub mod storage;
pub mod timer;

pub use ai::{AnswerHistory, GeminiClient, QuestionAnswerer, QuestionGenerator};
pub use error::{ApiError, ConfigError, CoreError, ParseError, StorageError, ValidationError};
pub use events::Event;
pub use haptics::{Cue, Haptics, LogHaptics, NoHaptics};
pub use memo::{Memo, MemoBook, MemoDraft, MemoFilter};
pub use quiz::{QuizEngine, QuizPhase};
pub use report::{aggregate, ReportAggregate, ReportPeriod};
pub use session::{SessionDraft, SessionRecord, SessionStore};
pub use storage::{Config, Database, HistoryStore};
pub use timer::{
    Countdown, ManualEntry, Scheduler, Stopwatch, StudyTimer, Tick, TimerPhase, TokioScheduler,
};
