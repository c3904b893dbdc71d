use serde::{Deserialize, Serialize};

use super::tagged::{require, TaggedLineParser, TaggedRecord};
use crate::error::ParseError;

/// Structured answer to a student's question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub subject: Option<String>,
    pub scope: Option<String>,
    pub answer: String,
    pub explanation: Option<String>,
}

impl AnswerSheet {
    /// Reply the model gives when it cannot answer.
    pub const UNKNOWN: &'static str = "わかりません";

    fn parser() -> TaggedLineParser {
        TaggedLineParser::new()
            .label("subject", &["科目"])
            .label("scope", &["範囲", "unit", "topic"])
            .label("answer", &["解答", "答え"])
            .label("explanation", &["解説", "説明"])
    }

    /// A bare 「わかりません」 reply is accepted as an unanswered sheet.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        if is_unknown(text) {
            return Ok(Self::unknown());
        }
        let record = Self::parser().parse_one(text)?;
        require(&record, 0, &["answer"])?;
        Ok(Self {
            subject: optional(&record, "subject"),
            scope: optional(&record, "scope"),
            answer: required(&record, "answer"),
            explanation: optional(&record, "explanation"),
        })
    }

    pub fn unknown() -> Self {
        Self {
            subject: None,
            scope: None,
            answer: Self::UNKNOWN.to_string(),
            explanation: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.answer == Self::UNKNOWN
    }
}

fn is_unknown(text: &str) -> bool {
    let text = text.trim().trim_matches(|c: char| matches!(c, '「' | '」' | '。' | '.'));
    text == AnswerSheet::UNKNOWN
}

/// One practice question produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub subject: Option<String>,
    pub difficulty: Option<String>,
}

impl GeneratedQuestion {
    fn parser() -> TaggedLineParser {
        TaggedLineParser::new()
            .label("question", &["問題"])
            .label("subject", &["科目"])
            .label("difficulty", &["難易度", "level"])
    }

    /// Parse a `---` delimited batch. Every record must carry a question.
    pub fn parse_batch(text: &str) -> Result<Vec<Self>, ParseError> {
        let records = Self::parser().parse(text)?;
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                require(record, i, &["question"])?;
                Ok(Self {
                    question: required(record, "question"),
                    subject: optional(record, "subject"),
                    difficulty: optional(record, "difficulty"),
                })
            })
            .collect()
    }
}

fn optional(record: &TaggedRecord, label: &str) -> Option<String> {
    record
        .get(label)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(record: &TaggedRecord, label: &str) -> String {
    record.get(label).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_sheet_in_japanese() {
        let text = "科目：数学\n範囲：二次関数\n解答：(0, -1)\n解説：頂点は y 軸上にある。\nx = 0 を代入する。";
        let sheet = AnswerSheet::parse(text).unwrap();
        assert_eq!(sheet.subject.as_deref(), Some("数学"));
        assert_eq!(sheet.scope.as_deref(), Some("二次関数"));
        assert_eq!(sheet.answer, "(0, -1)");
        assert_eq!(
            sheet.explanation.as_deref(),
            Some("頂点は y 軸上にある。\nx = 0 を代入する。")
        );
    }

    #[test]
    fn answer_sheet_with_markdown_labels() {
        let text = "**Subject:** Physics\n**Answer:** Galileo";
        let sheet = AnswerSheet::parse(text).unwrap();
        assert_eq!(sheet.subject.as_deref(), Some("Physics"));
        assert_eq!(sheet.answer, "Galileo");
        assert_eq!(sheet.scope, None);
    }

    #[test]
    fn bare_unknown_reply_is_an_unanswered_sheet() {
        for reply in ["わかりません", "  「わかりません」。\n"] {
            let sheet = AnswerSheet::parse(reply).unwrap();
            assert!(sheet.is_unknown());
            assert_eq!(sheet.subject, None);
        }
    }

    #[test]
    fn labelled_unknown_reply_keeps_its_fields() {
        let sheet = AnswerSheet::parse("科目：物理
解答：わかりません").unwrap();
        assert!(sheet.is_unknown());
        assert_eq!(sheet.subject.as_deref(), Some("物理"));
    }

    #[test]
    fn answer_sheet_requires_answer() {
        let err = AnswerSheet::parse("科目：英語\n解説：受動態").unwrap_err();
        assert!(matches!(err, ParseError::MissingField { ref label, .. } if label == "answer"));
    }

    #[test]
    fn question_batch() {
        let text = "問題：x^2 = 9 の正の解は？\n科目：数学\n難易度：易\n---\n\
                    Question: Which gas do plants absorb?\nSubject: Biology\n---\n";
        let batch = GeneratedQuestion::parse_batch(text).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].difficulty.as_deref(), Some("易"));
        assert_eq!(batch[1].question, "Which gas do plants absorb?");
        assert_eq!(batch[1].difficulty, None);
    }

    #[test]
    fn question_batch_reports_which_record_is_incomplete() {
        let text = "問題：一問目\n---\n科目：数学\n";
        let err = GeneratedQuestion::parse_batch(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingField {
                record: 2,
                label: "question".into()
            }
        );
    }
}
