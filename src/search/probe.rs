//! Query terms → library coordinates.
//!
//! Each term is hashed with xxh32, which yields a `u32` directly, so every
//! intermediate is unsigned before any modulo reduction. Probe `i` of a term
//! sits at hexagon `hash + i` with the remaining components drawn from
//! rotations of the mixed hash, so repeated probes for one term land close
//! together but never on the same book.

use serde::Serialize;
use xxhash_rust::xxh32::xxh32;

use super::mode::SearchMode;
use super::query::Query;
use crate::library::coordinate::{Coordinate, SHELVES, VOLUMES, WALLS};
use crate::library::Vocabulary;

const PROBE_MIX: u32 = 0x9E37_79B9;

/// One hashed probe: the term that produced it and where it landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    pub term: String,
    pub hash: u32,
    pub index: u32,
    pub coordinate: Coordinate,
}

pub fn term_hash(term: &str) -> u32 {
    xxh32(term.as_bytes(), 0)
}

pub fn probe_coordinate(hash: u32, index: u32) -> Coordinate {
    let mixed = hash.wrapping_add(index.wrapping_mul(PROBE_MIX));
    let wall = mixed.rotate_left(8) % u32::from(WALLS);
    let shelf = mixed.rotate_left(16) % u32::from(SHELVES);
    let volume = mixed.rotate_left(24) % u32::from(VOLUMES);
    Coordinate::wrapping(
        u64::from(hash) + u64::from(index),
        i64::from(wall),
        i64::from(shelf),
        i64::from(volume),
    )
}

/// Terms to probe, in order: tokens, then (unless the mode is precise) the
/// whole normalized query and any vocabulary concepts it mentions.
pub fn probe_terms(query: &Query, mode: SearchMode, vocabulary: &Vocabulary) -> Vec<String> {
    let mut terms: Vec<String> = query.tokens.clone();
    if mode.expands_terms() {
        let extra = std::iter::once(query.normalized.clone()).chain(
            vocabulary
                .matching_concepts(&query.tokens)
                .into_iter()
                .map(str::to_string),
        );
        for term in extra {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
    }
    terms
}

pub fn probes_for_term(term: &str, count: u32) -> Vec<Probe> {
    let hash = term_hash(term);
    (0..count)
        .map(|index| Probe {
            term: term.to_string(),
            hash,
            index,
            coordinate: probe_coordinate(hash, index),
        })
        .collect()
}

/// Volumes ±1..=±span on the same shelf, nearest first.
pub fn neighbourhood(coordinate: &Coordinate, span: u32) -> Vec<Coordinate> {
    let span = i64::from(span.min(u32::from(VOLUMES) / 2));
    let mut out = Vec::with_capacity(span as usize * 2);
    for offset in 1..=span {
        for delta in [-offset, offset] {
            let neighbour = coordinate.shifted_volume(delta);
            if neighbour != *coordinate && !out.contains(&neighbour) {
                out.push(neighbour);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable() {
        assert_eq!(term_hash("infinity"), term_hash("infinity"));
        assert_ne!(term_hash("infinity"), term_hash("paradox"));
    }

    #[test]
    fn probes_are_in_range_for_extreme_hashes() {
        for hash in [0u32, 1, 0x7FFF_FFFF, 0x8000_0000, u32::MAX] {
            for index in 0..8 {
                let c = probe_coordinate(hash, index);
                assert!(c.wall < WALLS && c.shelf < SHELVES && c.volume < VOLUMES);
                assert_eq!(c.hexagon, u64::from(hash) + u64::from(index));
            }
        }
    }

    #[test]
    fn repeated_probes_are_related_but_distinct() {
        let probes = probes_for_term("labyrinth", 3);
        assert_eq!(probes.len(), 3);
        assert!(probes.iter().all(|p| p.hash == probes[0].hash));
        assert_ne!(probes[0].coordinate, probes[1].coordinate);
        assert_eq!(probes[1].coordinate.hexagon, probes[0].coordinate.hexagon + 1);
    }

    #[test]
    fn precise_mode_probes_tokens_only() {
        let vocab = Vocabulary::builtin().unwrap();
        let q = Query::parse("infinity and paradox").unwrap();
        assert_eq!(
            probe_terms(&q, SearchMode::Precise, &vocab),
            vec!["infinity", "paradox"]
        );
        let wide = probe_terms(&q, SearchMode::Comprehensive, &vocab);
        assert_eq!(wide, vec!["infinity", "paradox", "infinity and paradox"]);
    }

    #[test]
    fn single_word_query_is_not_probed_twice() {
        let vocab = Vocabulary::builtin().unwrap();
        let q = Query::parse("Labyrinth").unwrap();
        assert_eq!(probe_terms(&q, SearchMode::Exploratory, &vocab), vec!["labyrinth"]);
    }

    #[test]
    fn neighbourhood_wraps_volumes() {
        let c = Coordinate::wrapping(3, 1, 1, 0);
        let volumes: Vec<u8> = neighbourhood(&c, 2).iter().map(|n| n.volume).collect();
        assert_eq!(volumes, vec![31, 1, 30, 2]);
        assert!(neighbourhood(&c, 0).is_empty());
    }
}
