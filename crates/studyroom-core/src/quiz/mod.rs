mod bank;
mod engine;
mod normalize;

pub use bank::{default_bank, Question};
pub use engine::{AnswerRecord, FinishReason, QuizConfig, QuizEngine, QuizPhase, QuizResults};
pub use normalize::{answers_match, normalize_answer};
