//! Parsing of `label: value` text returned by the language model.

mod schema;
mod tagged;

pub use schema::{AnswerSheet, GeneratedQuestion};
pub use tagged::{require, TaggedLineParser, TaggedRecord};
