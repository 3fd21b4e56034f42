//! Records produced by the generator. All of them serialize with camelCase
//! keys for the HTTP API.

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// A synthetic academic work, fully determined by the base seed and its coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// `hexagon.wall.shelf.volume`
    pub id: String,
    pub coordinate: Coordinate,
    pub title: String,
    pub author: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub chapters: Vec<Chapter>,
    pub bibliography: Vec<BibliographyEntry>,
    pub genre: String,
    pub publication_year: u32,
    /// Sum of chapter word counts.
    pub word_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    pub title: String,
    pub body: String,
    pub word_count: u32,
    /// Distinct concepts used in the chapter, in order of first use.
    pub key_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BibliographyEntry {
    pub author: String,
    pub title: String,
    pub year: u32,
    pub publisher: String,
}

impl Book {
    /// Chapter titles and bodies, for relevance scoring.
    pub fn chapter_texts(&self) -> impl Iterator<Item = &str> {
        self.chapters
            .iter()
            .flat_map(|c| [c.title.as_str(), c.body.as_str()])
    }
}

pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}
