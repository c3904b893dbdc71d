use clap::Args;
use studyroom_core::ai::GenerationRequest;
use studyroom_core::{Config, QuestionGenerator};

use super::print_json;

#[derive(Args)]
pub struct GenerateArgs {
    /// Source question to base the new ones on
    source: String,
    /// Number of questions
    #[arg(long, default_value = "3")]
    count: u32,
    /// Difficulty relative to the source question
    #[arg(long, default_value = "同レベル")]
    difficulty: String,
    #[arg(long, default_value = "")]
    subject: String,
    /// Unit or topic
    #[arg(long, default_value = "")]
    unit: String,
    /// Print JSON instead of numbered text
    #[arg(long)]
    json: bool,
}

pub fn run(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let generator = QuestionGenerator::new(super::ask::client(&config)?);
    let request = GenerationRequest {
        source_question: args.source,
        count: args.count,
        difficulty: args.difficulty,
        subject: args.subject,
        unit: args.unit,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let questions = runtime.block_on(generator.generate(&request))?;

    if args.json {
        print_json(&questions)?;
    } else {
        for (i, q) in questions.iter().enumerate() {
            let meta: Vec<&str> = [q.subject.as_deref(), q.difficulty.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if meta.is_empty() {
                println!("{}. {}", i + 1, q.question);
            } else {
                println!("{}. [{}] {}", i + 1, meta.join(" / "), q.question);
            }
        }
    }
    Ok(())
}
