//! Text relevance of a generated book to a query.
//!
//! Relevance of a text is the token-overlap ratio: the share of query tokens
//! that occur as whole words in the text. The exact-match component rewards
//! the whole query appearing verbatim in the title or abstract, with partial
//! credit for tokens appearing as substrings there.

use std::collections::HashSet;

use super::mode::ScoreWeights;
use super::query::Query;
use crate::library::Book;

/// Per-component relevance, each in `[0, 1]`, plus the weighted total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relevance {
    pub title: f64,
    pub summary: f64,
    pub chapters: f64,
    pub exact: f64,
    /// Weighted sum excluding novelty, which depends on what else is selected.
    pub base: f64,
}

pub fn score_book(book: &Book, query: &Query, weights: &ScoreWeights) -> Relevance {
    let title = overlap(&book.title, &query.tokens);
    let summary = overlap(&book.summary, &query.tokens);
    let chapters = overlap_many(book.chapter_texts(), &query.tokens);
    let exact = exact_match(book, query);
    let base = weights.title * title
        + weights.summary * summary
        + weights.chapters * chapters
        + weights.exact * exact;
    Relevance {
        title,
        summary,
        chapters,
        exact,
        base,
    }
}

/// Share of `tokens` present as whole words in `text`.
pub fn overlap(text: &str, tokens: &[String]) -> f64 {
    overlap_many(std::iter::once(text), tokens)
}

fn overlap_many<'a>(texts: impl Iterator<Item = &'a str>, tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let lowered: Vec<String> = texts.map(str::to_lowercase).collect();
    let words: HashSet<&str> = lowered
        .iter()
        .flat_map(|t| t.split(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();
    let hits = tokens.iter().filter(|t| words.contains(t.as_str())).count();
    hits as f64 / tokens.len() as f64
}

fn exact_match(book: &Book, query: &Query) -> f64 {
    let title = book.title.to_lowercase();
    let summary = book.summary.to_lowercase();
    if title.contains(&query.normalized) || summary.contains(&query.normalized) {
        return 1.0;
    }
    if query.tokens.is_empty() {
        return 0.0;
    }
    let hits = query
        .tokens
        .iter()
        .filter(|t| title.contains(t.as_str()) || summary.contains(t.as_str()))
        .count();
    0.5 * hits as f64 / query.tokens.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Coordinate;
    use crate::search::mode::SearchMode;

    fn book(title: &str, summary: &str, body: &str) -> Book {
        Book {
            id: "0.0.0.0".into(),
            coordinate: Coordinate::wrapping(0, 0, 0, 0),
            title: title.into(),
            author: "Ireneo Funes".into(),
            summary: summary.into(),
            chapters: vec![crate::library::Chapter {
                number: 1,
                title: "Opening".into(),
                body: body.into(),
                word_count: 0,
                key_terms: vec![],
            }],
            bibliography: vec![],
            genre: "Treatise".into(),
            publication_year: 1941,
            word_count: 0,
        }
    }

    #[test]
    fn overlap_counts_whole_words() {
        let tokens = vec!["infinity".to_string(), "paradox".to_string()];
        assert_eq!(overlap("On Infinity, and more", &tokens), 0.5);
        assert_eq!(overlap("paradoxes of infinity", &tokens), 0.5);
        assert_eq!(overlap("", &tokens), 0.0);
        assert_eq!(overlap("anything", &[]), 0.0);
    }

    #[test]
    fn title_match_outweighs_body_match() {
        let q = Query::parse("labyrinth").unwrap();
        let w = SearchMode::Comprehensive.weights();
        let in_title = score_book(&book("The Labyrinth", "x", "y"), &q, &w);
        let in_body = score_book(&book("Nothing", "x", "the labyrinth"), &q, &w);
        assert!(in_title.base > in_body.base);
        assert_eq!(in_title.title, 1.0);
        assert_eq!(in_body.chapters, 1.0);
    }

    #[test]
    fn exact_phrase_gets_full_credit() {
        let q = Query::parse("recursive time").unwrap();
        let w = SearchMode::Precise.weights();
        let exact = score_book(&book("The Recursive Time", "", ""), &q, &w);
        let partial = score_book(&book("Recursive Memory", "", ""), &q, &w);
        assert_eq!(exact.exact, 1.0);
        assert_eq!(partial.exact, 0.25);
        assert!(exact.base > partial.base);
    }
}
