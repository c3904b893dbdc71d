use super::client::TextGenerator;
use super::prompt::{generation_prompt, GenerationRequest};
use crate::error::{CoreError, Field, ValidationError};
use crate::parse::GeneratedQuestion;

pub const MAX_GENERATED: u32 = 10;

/// Produces practice questions similar to a source question.
pub struct QuestionGenerator<G> {
    generator: G,
}

impl<G: TextGenerator> QuestionGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedQuestion>, CoreError> {
        if request.source_question.trim().is_empty() {
            return Err(ValidationError::field(Field::Question, "source question is empty").into());
        }
        if request.count == 0 || request.count > MAX_GENERATED {
            return Err(ValidationError::field(
                Field::Question,
                format!("count must be between 1 and {MAX_GENERATED}"),
            )
            .into());
        }

        let raw = self.generator.generate(&generation_prompt(request)).await?;
        let questions = GeneratedQuestion::parse_batch(&raw)?;
        if questions.len() != request.count as usize {
            tracing::warn!(
                requested = request.count,
                received = questions.len(),
                "model returned a different number of questions"
            );
        }
        Ok(questions)
    }
}
