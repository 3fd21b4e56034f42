//! Greedy re-ranking under diversity constraints.
//!
//! At each step the best remaining candidate is taken, where "best" is its
//! base relevance plus a novelty bonus (distance to the nearest already
//! selected coordinate) minus small penalties for repeating a genre or a
//! publication period. An author already selected is ineligible until every
//! distinct author has been used; only then may authors repeat. Ties go to
//! the lower coordinate.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::library::{Book, Coordinate};

pub const GENRE_PENALTY: f64 = 0.05;
pub const PERIOD_PENALTY: f64 = 0.03;
/// Publication years closer than this count as the same period.
pub const PERIOD_YEARS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Candidate {
    pub book: Book,
    pub base: f64,
    pub probe_term: String,
}

/// A selected candidate with the score it was selected at.
#[derive(Debug, Clone)]
pub struct Ranked {
    pub candidate: Candidate,
    pub score: f64,
}

pub fn rerank(candidates: Vec<Candidate>, max_results: usize, novelty_weight: f64) -> Vec<Ranked> {
    let mut remaining = candidates;
    let mut selected: Vec<Ranked> = Vec::with_capacity(max_results.min(remaining.len()));
    let mut authors: HashSet<String> = HashSet::new();

    while selected.len() < max_results && !remaining.is_empty() {
        let fresh_author_left = remaining
            .iter()
            .any(|c| !authors.contains(&c.book.author));

        let mut best: Option<(usize, f64)> = None;
        for (i, cand) in remaining.iter().enumerate() {
            if fresh_author_left && authors.contains(&cand.book.author) {
                continue;
            }
            let score = selection_score(cand, &selected, novelty_weight);
            let better = match best {
                None => true,
                Some((j, best_score)) => {
                    compare(score, &cand.book.coordinate, best_score, &remaining[j].book.coordinate)
                        == Ordering::Greater
                }
            };
            if better {
                best = Some((i, score));
            }
        }

        let Some((i, score)) = best else { break };
        let candidate = remaining.swap_remove(i);
        authors.insert(candidate.book.author.clone());
        selected.push(Ranked { candidate, score });
    }

    selected.sort_by(|a, b| {
        compare(
            b.score,
            &b.candidate.book.coordinate,
            a.score,
            &a.candidate.book.coordinate,
        )
    });
    selected
}

fn selection_score(cand: &Candidate, selected: &[Ranked], novelty_weight: f64) -> f64 {
    let novelty = selected
        .iter()
        .map(|s| cand.book.coordinate.distance(&s.candidate.book.coordinate))
        .fold(1.0_f64, f64::min);

    let mut penalty = 0.0;
    if selected.iter().any(|s| s.candidate.book.genre == cand.book.genre) {
        penalty += GENRE_PENALTY;
    }
    if selected.iter().any(|s| {
        s.candidate.book.publication_year.abs_diff(cand.book.publication_year) < PERIOD_YEARS
    }) {
        penalty += PERIOD_PENALTY;
    }

    cand.base + novelty_weight * novelty - penalty
}

/// Higher score first; equal scores order the lower coordinate first.
fn compare(score_a: f64, coord_a: &Coordinate, score_b: f64, coord_b: &Coordinate) -> Ordering {
    score_a
        .total_cmp(&score_b)
        .then_with(|| coord_b.cmp(coord_a))
}
