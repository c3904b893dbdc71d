//! Model-backed helpers: answering questions and generating similar ones.

pub mod answer;
pub mod client;
pub mod credentials;
pub mod generate;
pub mod prompt;

pub use answer::{AnswerHistory, AnswerHistoryItem, QuestionAnswerer};
pub use client::{GeminiClient, GeminiOptions, TextGenerator};
pub use credentials::{clear_api_key, resolve_api_key, store_api_key, KeySource};
pub use generate::QuestionGenerator;
pub use prompt::{answer_prompt, generation_prompt, GenerationRequest};
