//! Loose answer matching.
//!
//! Free-text answers are compared after case-folding and dropping
//! whitespace, brackets and separator punctuation. Sign characters (`-`,
//! `+`) are kept because they change the meaning of numeric answers.

fn is_ignored(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '(' | ')' | '[' | ']' | '{' | '}'
                | ',' | '.' | ';' | '!' | '?' | '"' | '\''
                | '（' | '）' | '［' | '］' | '「' | '」'
                | '、' | '。' | '，' | '．' | '！' | '？'
        )
}

pub fn normalize_answer(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !is_ignored(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize_answer(given) == normalize_answer(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(answers_match("5", " 5 "));
    }

    #[test]
    fn brackets_and_commas_are_ignored() {
        assert!(answers_match("(0, -1)", "0,-1"));
        assert!(answers_match("［2］", "2"));
    }

    #[test]
    fn case_is_folded() {
        assert!(answers_match("Galileo", "galileo"));
    }

    #[test]
    fn sentence_punctuation_is_ignored() {
        assert!(answers_match("I had met him", "I had met him."));
    }

    #[test]
    fn signs_still_matter() {
        assert!(!answers_match("(0, 1)", "(0, -1)"));
        assert!(!answers_match("4", "5"));
    }
}
