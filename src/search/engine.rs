//! The procedural search pipeline: validate → derive probe terms → hash to
//! coordinates → generate probe and neighbour books → score → diversify →
//! sort and truncate.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::diversity::{rerank, Candidate};
use super::mode::SearchMode;
use super::probe::{neighbourhood, probe_terms, probes_for_term, Probe};
use super::query::Query;
use super::scoring::score_book;
use crate::config::SearchConfig;
use crate::error::{BabelError, Result};
use crate::library::{Book, Library};

/// A book annotated with its relevance score and the probe term that reached it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub book: Book,
    pub score: f64,
    #[serde(default)]
    pub probe_term: String,
}

/// Everything a search produced, including what the caller needs for metadata.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: String,
    pub requested_mode: SearchMode,
    /// Mode whose weights produced the results.
    pub mode: SearchMode,
    pub results: Vec<SearchResult>,
    pub total_explored: usize,
    pub probes: Vec<Probe>,
    /// Generation stopped early because of a deadline or cancellation.
    pub truncated: bool,
    /// Set when enhanced mode fell back to procedural generation.
    pub fallback_reason: Option<String>,
    pub external: bool,
}

/// Limits on how much work a single search may do.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    pub deadline: Option<Instant>,
    pub cancelled: Option<Arc<AtomicBool>>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn exhausted(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
            || self
                .cancelled
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

pub struct SearchEngine {
    library: Arc<Library>,
    settings: SearchConfig,
}

impl SearchEngine {
    pub fn new(library: Arc<Library>, settings: SearchConfig) -> Self {
        Self { library, settings }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    /// Check the requested count and cap it at the configured ceiling.
    pub fn clamp_max_results(&self, requested: Option<usize>) -> Result<usize> {
        match requested {
            None => Ok(self
                .settings
                .default_max_results
                .min(self.settings.max_results_ceiling)),
            Some(0) => Err(BabelError::InvalidLimit(
                "maxResults must be a positive integer".into(),
            )),
            Some(n) => Ok(n.min(self.settings.max_results_ceiling)),
        }
    }

    pub fn search(&self, query: &str, mode: SearchMode, max_results: usize) -> Result<SearchOutcome> {
        self.search_within(query, mode, max_results, &Budget::unlimited())
    }

    pub fn search_within(
        &self,
        query: &str,
        mode: SearchMode,
        max_results: usize,
        budget: &Budget,
    ) -> Result<SearchOutcome> {
        let parsed = Query::parse(query)?;
        let max_results = self.clamp_max_results(Some(max_results))?;
        let effective = mode.procedural();
        let weights = effective.weights();

        // 1-3. Terms and their probe coordinates.
        let terms = probe_terms(&parsed, effective, self.library.vocabulary());
        let per_term = self.settings.probes_per_term + effective.extra_probes();
        let probes: Vec<Probe> = terms
            .iter()
            .flat_map(|t| probes_for_term(t, per_term))
            .collect();

        // 4. Generate probe books and their shelf neighbours.
        let mut seen = HashSet::new();
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut truncated = false;
        'probing: for probe in &probes {
            let around = std::iter::once(probe.coordinate)
                .chain(neighbourhood(&probe.coordinate, self.settings.neighbor_span));
            for coordinate in around {
                if candidates.len() >= self.settings.max_candidates {
                    break 'probing;
                }
                // The first probe's book is always generated, so a search
                // cut short by its budget still has something to rank.
                if !candidates.is_empty() && budget.exhausted() {
                    truncated = true;
                    break 'probing;
                }
                if !seen.insert(coordinate) {
                    continue;
                }
                // 5. Base relevance; novelty is added during re-ranking.
                let book = self.library.generate_book(&coordinate);
                let relevance = score_book(&book, &parsed, &weights);
                candidates.push(Candidate {
                    book,
                    base: relevance.base,
                    probe_term: probe.term.clone(),
                });
            }
        }
        let total_explored = candidates.len();

        // 6-8. Diversify, sort, truncate.
        let results: Vec<SearchResult> = rerank(candidates, max_results, weights.novelty)
            .into_iter()
            .map(|r| SearchResult {
                book: r.candidate.book,
                score: round_score(r.score),
                probe_term: r.candidate.probe_term,
            })
            .collect();

        tracing::debug!(
            query = %parsed.text,
            mode = %effective,
            terms = terms.len(),
            explored = total_explored,
            returned = results.len(),
            truncated,
            "procedural search complete"
        );

        Ok(SearchOutcome {
            query: parsed.text,
            requested_mode: mode,
            mode: effective,
            results,
            total_explored,
            probes,
            truncated,
            fallback_reason: None,
            external: false,
        })
    }
}

fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Vocabulary, YearSpan};

    fn engine() -> SearchEngine {
        let vocab = Arc::new(Vocabulary::builtin().unwrap());
        let library = Library::new("borges-1962", vocab, YearSpan { earliest: 1850, latest: 2025 });
        SearchEngine::new(Arc::new(library), SearchConfig::default())
    }

    #[test]
    fn clamp_caps_at_ceiling_and_rejects_zero() {
        let e = engine();
        assert_eq!(e.clamp_max_results(None).unwrap(), 10);
        assert_eq!(e.clamp_max_results(Some(5)).unwrap(), 5);
        assert_eq!(e.clamp_max_results(Some(500)).unwrap(), 20);
        assert!(matches!(e.clamp_max_results(Some(0)), Err(BabelError::InvalidLimit(_))));
    }

    #[test]
    fn explores_probes_and_neighbours() {
        let e = engine();
        let outcome = e.search("labyrinth", SearchMode::Precise, 5).unwrap();
        // one term, two probes, each with four neighbours
        assert_eq!(outcome.probes.len(), 2);
        assert_eq!(outcome.total_explored, 10);
        assert!(!outcome.truncated);
        assert_eq!(outcome.results.len(), 5);
    }

    #[test]
    fn candidate_count_is_bounded() {
        let e = engine();
        let long_query: String = (0..80).map(|i| format!("word{i} ")).collect();
        let outcome = e.search(&long_query, SearchMode::Exploratory, 20).unwrap();
        assert!(outcome.total_explored <= e.settings().max_candidates);
        assert!(outcome.results.len() <= 20);
    }

    #[test]
    fn expired_deadline_truncates() {
        let e = engine();
        let budget = Budget {
            deadline: Some(Instant::now()),
            cancelled: None,
        };
        let outcome = e
            .search_within("infinity", SearchMode::Comprehensive, 5, &budget)
            .unwrap();
        assert!(outcome.truncated);
        assert_eq!(outcome.total_explored, 1);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].book.coordinate, outcome.probes[0].coordinate);
    }

    #[test]
    fn cancellation_flag_stops_generation() {
        let e = engine();
        let flag = Arc::new(AtomicBool::new(true));
        let budget = Budget {
            deadline: None,
            cancelled: Some(flag),
        };
        let outcome = e
            .search_within("memory", SearchMode::Comprehensive, 5, &budget)
            .unwrap();
        assert!(outcome.truncated);
        assert!(!outcome.results.is_empty());
    }

    #[test]
    fn enhanced_runs_procedurally_as_comprehensive() {
        let e = engine();
        let a = e.search("mirror", SearchMode::Enhanced, 5).unwrap();
        let b = e.search("mirror", SearchMode::Comprehensive, 5).unwrap();
        assert_eq!(a.mode, SearchMode::Comprehensive);
        assert_eq!(a.requested_mode, SearchMode::Enhanced);
        assert_eq!(a.results, b.results);
    }
}
