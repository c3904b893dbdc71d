//! Prompt text for the two model-backed features.
//!
//! Both prompts pin the reply to the tagged-line format understood by
//! [`crate::parse`].

use serde::{Deserialize, Serialize};

/// Wrap a student's question with answering rules and the output format.
pub fn answer_prompt(question: &str) -> String {
    format!(
        "{question}\n\n\
         ---\n\
         上記の問題に対して、以下のルールに従って必ず日本語で解答してください。\n\n\
         【重要な指示】\n\
         ・不正確な情報や曖昧な推測を含めないこと\n\
         ・わからない場合は「解答：わかりません」とだけ答えること\n\
         ・事実に基づき、正確で簡潔な記述を行うこと\n\n\
         【出力形式】\n\
         科目：〜\n\
         範囲：〜\n\
         解答：〜\n\
         解説：〜\n\n\
         この形式を厳密に守ってください。",
        question = question.trim()
    )
}

/// Parameters for similar-question generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub source_question: String,
    pub count: u32,
    pub difficulty: String,
    pub subject: String,
    pub unit: String,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            source_question: String::new(),
            count: 3,
            difficulty: "同レベル".to_string(),
            subject: String::new(),
            unit: String::new(),
        }
    }
}

pub fn generation_prompt(req: &GenerationRequest) -> String {
    let mut prompt = format!(
        "次の問題をもとに、類似問題を{count}問作成してください。\n\n\
         【元の問題】\n{source}\n\n\
         【条件】\n\
         ・難易度：{difficulty}\n",
        count = req.count,
        source = req.source_question.trim(),
        difficulty = req.difficulty,
    );
    if !req.subject.trim().is_empty() {
        prompt.push_str(&format!("・科目：{}\n", req.subject.trim()));
    }
    if !req.unit.trim().is_empty() {
        prompt.push_str(&format!("・単元・範囲：{}\n", req.unit.trim()));
    }
    prompt.push_str(
        "\n【出力形式】\n\
         問題：〜\n\
         科目：〜\n\
         難易度：〜\n\
         ---\n\
         各問題を「---」の行で区切り、この形式以外の文章は出力しないでください。",
    );
    prompt
}
