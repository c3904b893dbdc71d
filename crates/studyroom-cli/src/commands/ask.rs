use clap::Subcommand;
use studyroom_core::ai::resolve_api_key;
use studyroom_core::{Config, GeminiClient, HistoryStore, QuestionAnswerer, ValidationError};

use super::print_json;

#[derive(Subcommand)]
pub enum AskAction {
    /// Ask a question and record the answer
    Question {
        /// Question text
        text: String,
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show answered questions, newest first
    History {
        /// Filter by subject or question text
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Delete a history entry by id
    Remove { id: String },
}

pub(crate) fn client(config: &Config) -> Result<GeminiClient, Box<dyn std::error::Error>> {
    let (key, source) = resolve_api_key()?;
    tracing::debug!(?source, model = %config.ai.model, "using Gemini");
    Ok(GeminiClient::new(key, config.gemini_options())?)
}

pub fn run(action: AskAction) -> Result<(), Box<dyn std::error::Error>> {
    let history = HistoryStore::open()?;
    let mut answers = history.load_answers()?;

    match action {
        AskAction::Question { text, json } => {
            let config = Config::load()?;
            let answerer = QuestionAnswerer::new(client(&config)?);
            let runtime = tokio::runtime::Runtime::new()?;
            let item = runtime.block_on(answerer.ask(&text, &mut answers))?;
            history.save_answers(&answers)?;

            if json {
                print_json(&item)?;
            } else {
                let sheet = &item.sheet;
                if let Some(subject) = &sheet.subject {
                    println!("科目: {subject}");
                }
                if let Some(scope) = &sheet.scope {
                    println!("範囲: {scope}");
                }
                println!("解答: {}", sheet.answer);
                if let Some(explanation) = &sheet.explanation {
                    println!("解説: {explanation}");
                }
            }
        }
        AskAction::History { search } => {
            print_json(&answers.search(&search))?;
        }
        AskAction::Remove { id } => {
            let removed = answers
                .remove(&id)
                .ok_or(ValidationError::NotFound(id))?;
            history.save_answers(&answers)?;
            print_json(&removed)?;
        }
    }
    Ok(())
}
