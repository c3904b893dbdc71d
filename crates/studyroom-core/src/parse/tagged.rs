//! `label: value` records.
//!
//! Grammar, one line at a time:
//!
//! ```text
//! record     := field (field | continuation | blank)*
//! field      := ["**"] label ["**"] (":" | "：") value
//! continuation := any other non-blank line (appended to the previous value)
//! delimiter  := "---" "-"*          (ends the current record)
//! ```
//!
//! Labels are matched against a fixed set of aliases so that a colon inside
//! ordinary text (`y = f(x): ...`) is never mistaken for a field.

use crate::error::ParseError;

/// One parsed record: fields in input order, keyed by canonical label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedRecord {
    fields: Vec<(String, String)>,
}

impl TaggedRecord {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    fn contains(&self, label: &str) -> bool {
        self.fields.iter().any(|(l, _)| l == label)
    }
}

/// Known labels. Each entry maps a canonical name to the spellings accepted
/// in input.
#[derive(Debug, Clone)]
pub struct TaggedLineParser {
    labels: Vec<(&'static str, Vec<&'static str>)>,
}

impl TaggedLineParser {
    pub fn new() -> Self {
        Self { labels: Vec::new() }
    }

    pub fn label(mut self, canonical: &'static str, aliases: &[&'static str]) -> Self {
        let mut spellings = vec![canonical];
        spellings.extend_from_slice(aliases);
        self.labels.push((canonical, spellings));
        self
    }

    /// Parse every record in `text`. Blank records (e.g. a trailing
    /// delimiter) are skipped.
    pub fn parse(&self, text: &str) -> Result<Vec<TaggedRecord>, ParseError> {
        let mut records = Vec::new();
        let mut current = TaggedRecord::default();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if is_delimiter(line) {
                if !current.fields.is_empty() {
                    records.push(finish(std::mem::take(&mut current)));
                }
                continue;
            }

            if let Some((label, value)) = self.match_field(line) {
                if current.contains(label) {
                    return Err(ParseError::DuplicateField {
                        line: line_no,
                        label: label.to_string(),
                    });
                }
                current.fields.push((label.to_string(), value.to_string()));
                continue;
            }

            match current.fields.last_mut() {
                Some((_, value)) => {
                    if !value.is_empty() || !line.is_empty() {
                        value.push('\n');
                    }
                    value.push_str(line);
                }
                None if line.is_empty() => {}
                None => {
                    return Err(ParseError::OrphanLine {
                        line: line_no,
                        text: line.to_string(),
                    })
                }
            }
        }

        if !current.fields.is_empty() {
            records.push(finish(current));
        }
        if records.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(records)
    }

    /// Parse exactly one record (extra records are ignored).
    pub fn parse_one(&self, text: &str) -> Result<TaggedRecord, ParseError> {
        let mut records = self.parse(text)?;
        Ok(records.swap_remove(0))
    }

    fn match_field<'a>(&self, line: &'a str) -> Option<(&'static str, &'a str)> {
        let (head, value) = split_label(line)?;
        let head = head.trim().trim_matches('*').trim();
        self.labels.iter().find_map(|(canonical, spellings)| {
            spellings
                .iter()
                .any(|s| s.eq_ignore_ascii_case(head))
                .then_some((*canonical, value.trim()))
        })
    }
}

impl Default for TaggedLineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Require a record to carry `labels`.
pub fn require(record: &TaggedRecord, index: usize, labels: &[&str]) -> Result<(), ParseError> {
    for label in labels {
        match record.get(label) {
            Some(v) if !v.is_empty() => {}
            _ => {
                return Err(ParseError::MissingField {
                    record: index + 1,
                    label: (*label).to_string(),
                })
            }
        }
    }
    Ok(())
}

fn split_label(line: &str) -> Option<(&str, &str)> {
    let ascii = line.find(':');
    let wide = line.find('：');
    let (pos, width) = match (ascii, wide) {
        (Some(a), Some(w)) if w < a => (w, '：'.len_utf8()),
        (Some(a), _) => (a, 1),
        (None, Some(w)) => (w, '：'.len_utf8()),
        (None, None) => return None,
    };
    // Markdown bold may close after the colon: "**Answer:** 5".
    let value = line[pos + width..].trim_start_matches('*');
    Some((&line[..pos], value))
}

fn is_delimiter(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

fn finish(mut record: TaggedRecord) -> TaggedRecord {
    for (_, value) in &mut record.fields {
        let trimmed = value.trim_end().to_string();
        *value = trimmed;
    }
    record
}
