//! Coordinate → book generation.
//!
//! [`generate_book`] is a pure function of the base seed, the coordinate, the
//! vocabulary and the year span. Every choice is a draw from one [`SeedRng`]
//! seeded by [`Coordinate::seed_string`], taken in a fixed order:
//! title, author, genre, year, target length, chapter count, abstract,
//! chapters, bibliography.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use super::rng::SeedRng;
use super::template::{capitalize, SlotKind, Template};
use super::types::{count_words, BibliographyEntry, Book, Chapter};
use super::vocabulary::Vocabulary;

pub const MIN_WORDS: u32 = 2_000;
pub const MAX_WORDS: u32 = 10_000;
pub const MIN_CHAPTERS: u32 = 6;
pub const MAX_CHAPTERS: u32 = 15;
pub const MIN_CITATIONS: u64 = 5;
pub const MAX_CITATIONS: u64 = 20;

/// Relative frequency of 6..=15 chapters; mean is about twelve.
const CHAPTER_COUNT_WEIGHTS: [u32; 10] = [1, 1, 1, 2, 3, 5, 7, 8, 7, 5];

const MAX_KEY_TERMS: usize = 5;

/// Inclusive range of publication and citation years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpan {
    pub earliest: u32,
    pub latest: u32,
}

/// A seeded library: base seed, vocabulary and year span bundled for reuse.
#[derive(Debug, Clone)]
pub struct Library {
    base_seed: String,
    vocabulary: Arc<Vocabulary>,
    years: YearSpan,
}

impl Library {
    pub fn new(base_seed: impl Into<String>, vocabulary: Arc<Vocabulary>, years: YearSpan) -> Self {
        Self {
            base_seed: base_seed.into(),
            vocabulary,
            years,
        }
    }

    pub fn base_seed(&self) -> &str {
        &self.base_seed
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn years(&self) -> YearSpan {
        self.years
    }

    pub fn generate_book(&self, coordinate: &Coordinate) -> Book {
        generate_book(&self.base_seed, coordinate, &self.vocabulary, self.years)
    }
}

pub fn generate_book(
    base_seed: &str,
    coordinate: &Coordinate,
    vocabulary: &Vocabulary,
    years: YearSpan,
) -> Book {
    // Fields are public, so re-reduce before seeding.
    let coordinate = Coordinate::wrapping(
        coordinate.hexagon,
        coordinate.wall as i64,
        coordinate.shelf as i64,
        coordinate.volume as i64,
    );
    let mut picker = Picker::new(&coordinate.seed_string(base_seed), vocabulary);

    let title = picker.fill(&vocabulary.title_templates);
    let author = picker.author_name();
    let genre = picker.pick_str(&vocabulary.genres);
    let publication_year = picker.year(years);
    let target_words = picker.target_word_count();
    let chapter_count = picker.chapter_count();

    let abstract_sentences = picker.rng.between(3, 4);
    let summary = (0..abstract_sentences)
        .map(|_| picker.fill(&vocabulary.abstract_templates))
        .collect::<Vec<_>>()
        .join(" ");

    let share = (target_words / chapter_count).max(1);
    let chapters: Vec<Chapter> = (1..=chapter_count)
        .map(|number| picker.chapter(number, share))
        .collect();

    let citations = picker.rng.between(MIN_CITATIONS, MAX_CITATIONS);
    let mut bibliography: Vec<BibliographyEntry> = (0..citations)
        .map(|_| BibliographyEntry {
            author: picker.author_name(),
            title: picker.fill(&vocabulary.citation_templates),
            year: picker.year(years),
            publisher: picker.pick_str(&vocabulary.publishers),
        })
        .collect();
    bibliography.sort_by(|a, b| a.author.cmp(&b.author).then(a.year.cmp(&b.year)));

    let word_count = chapters.iter().map(|c| c.word_count).sum();

    Book {
        id: coordinate.id(),
        coordinate,
        title,
        author,
        summary,
        chapters,
        bibliography,
        genre,
        publication_year,
        word_count,
    }
}

struct Picker<'a> {
    rng: SeedRng,
    vocab: &'a Vocabulary,
    concepts_used: Vec<String>,
}

impl<'a> Picker<'a> {
    fn new(seed: &str, vocab: &'a Vocabulary) -> Self {
        Self {
            rng: SeedRng::from_seed(seed),
            vocab,
            concepts_used: Vec::new(),
        }
    }

    fn word(&mut self, kind: SlotKind) -> String {
        let vocab = self.vocab;
        match kind {
            SlotKind::Concept => {
                let term = self
                    .rng
                    .weighted_index(vocab.concept_weights())
                    .and_then(|i| vocab.concepts.get(i))
                    .map(|t| t.term.clone())
                    .unwrap_or_default();
                self.concepts_used.push(term.clone());
                term
            }
            SlotKind::Field => self
                .rng
                .weighted_index(vocab.field_weights())
                .and_then(|i| vocab.fields.get(i))
                .map(|t| t.term.clone())
                .unwrap_or_default(),
            SlotKind::Adjective => self.pick_str(&vocab.adjectives),
            SlotKind::Scholar => self.pick_str(&vocab.last_names),
        }
    }

    fn pick_str(&mut self, items: &[String]) -> String {
        self.rng.pick(items).cloned().unwrap_or_default()
    }

    fn fill(&mut self, templates: &'a [Template]) -> String {
        match self.rng.pick(templates) {
            Some(template) => capitalize(&template.fill_with(|kind| self.word(kind))),
            None => String::new(),
        }
    }

    fn author_name(&mut self) -> String {
        let vocab = self.vocab;
        let first = self.pick_str(&vocab.first_names);
        let last = self.pick_str(&vocab.last_names);
        if self.rng.chance(1, 3) {
            let middle = self.pick_str(&vocab.first_names);
            let initial = middle.chars().next().unwrap_or('X');
            format!("{first} {initial}. {last}")
        } else {
            format!("{first} {last}")
        }
    }

    fn year(&mut self, years: YearSpan) -> u32 {
        self.rng.between(years.earliest as u64, years.latest as u64) as u32
    }

    /// Skewed toward the short end: mean near 4,200 words.
    fn target_word_count(&mut self) -> u32 {
        let a = self.rng.below(1000);
        let b = self.rng.below(1000);
        let jitter = self.rng.between(0, 400);
        let words = MIN_WORDS as u64 + (8_000 * a * b) / 1_000_000 + jitter;
        words.min(MAX_WORDS as u64) as u32
    }

    fn chapter_count(&mut self) -> u32 {
        let idx = self.rng.weighted_index(&CHAPTER_COUNT_WEIGHTS).unwrap_or(0) as u32;
        MIN_CHAPTERS + idx
    }

    fn chapter(&mut self, number: u32, target_words: u32) -> Chapter {
        let vocab = self.vocab;
        self.concepts_used.clear();
        let title = self.fill(&vocab.chapter_title_templates);

        let mut paragraphs: Vec<String> = Vec::new();
        let mut words = 0u32;
        while words < target_words {
            let sentences = self.rng.between(3, 6);
            let mut paragraph = Vec::with_capacity(sentences as usize);
            for _ in 0..sentences {
                let sentence = self.fill(&vocab.sentence_templates);
                words += count_words(&sentence).max(1);
                paragraph.push(sentence);
                if words >= target_words {
                    break;
                }
            }
            paragraphs.push(paragraph.join(" "));
        }
        let body = paragraphs.join("\n\n");

        let mut key_terms: Vec<String> = Vec::new();
        for term in self.concepts_used.drain(..) {
            if key_terms.len() == MAX_KEY_TERMS {
                break;
            }
            if !key_terms.contains(&term) {
                key_terms.push(term);
            }
        }

        Chapter {
            number,
            title,
            word_count: count_words(&body),
            body,
            key_terms,
        }
    }
}
