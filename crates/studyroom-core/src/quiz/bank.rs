use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub answer: String,
    pub subject: String,
}

impl Question {
    pub fn new(id: u32, text: &str, answer: &str, subject: &str) -> Self {
        Self {
            id,
            text: text.into(),
            answer: answer.into(),
            subject: subject.into(),
        }
    }
}

/// The built-in time-attack question set.
pub fn default_bank() -> Vec<Question> {
    vec![
        Question::new(
            1,
            "A right triangle has legs of 3 cm and 4 cm. How long is the hypotenuse (cm)?",
            "5",
            "Math",
        ),
        Question::new(2, "Which element has the symbol Na?", "Sodium", "Chemistry"),
        Question::new(
            3,
            "Rewrite 'He is reading a book.' in the progressive passive.",
            "A book is being read by him.",
            "English",
        ),
        Question::new(4, "What is the positive solution of x^2 - 4 = 0?", "2", "Math"),
        Question::new(5, "Who discovered the law of inertia?", "Galileo", "Physics"),
        Question::new(6, "Which element has atomic number 8?", "Oxygen", "Chemistry"),
        Question::new(
            7,
            "Give the vertex of the graph of y = x^2 - 1.",
            "(0, -1)",
            "Math",
        ),
        Question::new(
            8,
            "Express 'I met him' in the past perfect.",
            "I had met him.",
            "English",
        ),
    ]
}
