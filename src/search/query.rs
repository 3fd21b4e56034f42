//! Query validation and tokenization. Tokens are lowercase runs of
//! alphanumeric characters; nothing smarter than that.

use crate::error::{BabelError, Result};

pub const MAX_QUERY_CHARS: usize = 500;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "by", "for", "from", "in", "into", "is", "it", "of",
    "on", "or", "the", "to", "with",
];

/// A validated query and its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Trimmed text as the caller wrote it.
    pub text: String,
    /// Lowercased, whitespace-collapsed form used for phrase matching and probing.
    pub normalized: String,
    /// Distinct content tokens in order of first appearance.
    pub tokens: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Result<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(BabelError::InvalidQuery("query must not be empty".into()));
        }
        let chars = text.chars().count();
        if chars > MAX_QUERY_CHARS {
            return Err(BabelError::InvalidQuery(format!(
                "query is {chars} characters, maximum is {MAX_QUERY_CHARS}"
            )));
        }

        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Err(BabelError::InvalidQuery(
                "query contains no searchable words".into(),
            ));
        }

        Ok(Self {
            text: text.to_string(),
            normalized: text
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
            tokens,
        })
    }
}

/// Split into distinct lowercase tokens, dropping stopwords unless nothing else remains.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut all: Vec<String> = Vec::new();
    for word in text.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        let word = word.to_lowercase();
        if !all.contains(&word) {
            all.push(word);
        }
    }

    let content: Vec<String> = all
        .iter()
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .cloned()
        .collect();
    if content.is_empty() {
        all
    } else {
        content
    }
}
