//! Async front door to searching: runs the procedural engine on the blocking
//! pool under a deadline, and applies the enhanced-mode fallback policy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::engine::{Budget, SearchEngine, SearchOutcome};
use super::enhanced::ExternalSearch;
use super::mode::SearchMode;
use super::query::Query;
use crate::error::Result;

pub struct SearchService {
    engine: Arc<SearchEngine>,
    external: Option<ExternalSearch>,
    request_timeout: Duration,
}

/// Raises the cancellation flag when dropped, e.g. when the request future
/// is abandoned because the client went away.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl SearchService {
    pub fn new(
        engine: Arc<SearchEngine>,
        external: Option<ExternalSearch>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            external,
            request_timeout,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn enhanced_enabled(&self) -> bool {
        self.external.is_some()
    }

    pub async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        max_results: Option<usize>,
    ) -> Result<SearchOutcome> {
        // Validate before anything leaves the process.
        let parsed = Query::parse(query)?;
        let max_results = self.engine.clamp_max_results(max_results)?;

        if mode != SearchMode::Enhanced {
            return self.procedural(parsed.text, mode, max_results).await;
        }

        let reason = match &self.external {
            None => "enhanced search is disabled".to_string(),
            Some(external) => match external.search(&parsed.text, max_results).await {
                Ok(mut results) if !results.is_empty() => {
                    results.truncate(max_results);
                    tracing::info!(
                        query = %parsed.text,
                        returned = results.len(),
                        "enhanced search answered by collaborator"
                    );
                    let total_explored = results.len();
                    return Ok(SearchOutcome {
                        query: parsed.text,
                        requested_mode: mode,
                        mode,
                        results,
                        total_explored,
                        probes: Vec::new(),
                        truncated: false,
                        fallback_reason: None,
                        external: true,
                    });
                }
                Ok(_) => "collaborator returned no results".to_string(),
                Err(e) => e.to_string(),
            },
        };

        tracing::warn!(query = %parsed.text, reason = %reason, "enhanced search falling back to procedural generation");
        let mut outcome = self.procedural(parsed.text, mode, max_results).await?;
        outcome.fallback_reason = Some(reason);
        Ok(outcome)
    }

    async fn procedural(
        &self,
        query: String,
        mode: SearchMode,
        max_results: usize,
    ) -> Result<SearchOutcome> {
        let flag = Arc::new(AtomicBool::new(false));
        let _guard = CancelOnDrop(Arc::clone(&flag));
        let budget = Budget {
            deadline: Some(Instant::now() + self.request_timeout),
            cancelled: Some(flag),
        };

        let engine = Arc::clone(&self.engine);
        let outcome = tokio::task::spawn_blocking(move || {
            engine.search_within(&query, mode, max_results, &budget)
        })
        .await??;

        if outcome.truncated {
            tracing::warn!(
                query = %outcome.query,
                explored = outcome.total_explored,
                "search hit its deadline; returning partial results"
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnhancedConfig, SearchConfig};
    use crate::error::BabelError;
    use crate::library::{Library, Vocabulary, YearSpan};

    fn engine() -> Arc<SearchEngine> {
        let vocab = Arc::new(Vocabulary::builtin().unwrap());
        let library = Library::new("borges-1962", vocab, YearSpan { earliest: 1850, latest: 2025 });
        Arc::new(SearchEngine::new(Arc::new(library), SearchConfig::default()))
    }

    #[tokio::test]
    async fn disabled_enhanced_mode_falls_back() {
        let service = SearchService::new(engine(), None, Duration::from_secs(5));
        let outcome = service
            .search("infinity and paradox", SearchMode::Enhanced, Some(5))
            .await
            .unwrap();
        assert!(!outcome.results.is_empty());
        assert!(!outcome.external);
        assert_eq!(outcome.mode, SearchMode::Comprehensive);
        assert_eq!(
            outcome.fallback_reason.as_deref(),
            Some("enhanced search is disabled")
        );
    }

    #[tokio::test]
    async fn unreachable_collaborator_falls_back() {
        let external = ExternalSearch::from_config(&EnhancedConfig {
            enabled: true,
            url: "http://127.0.0.1:9/search".into(),
            timeout_ms: 300,
        })
        .unwrap();
        let service = SearchService::new(engine(), external, Duration::from_secs(5));
        let outcome = service
            .search("labyrinth", SearchMode::Enhanced, Some(3))
            .await
            .unwrap();
        assert!(!outcome.results.is_empty());
        assert!(outcome.results.len() <= 3);
        assert!(outcome.fallback_reason.is_some());
    }

    #[tokio::test]
    async fn zero_deadline_fallback_still_returns_results() {
        let service = SearchService::new(engine(), None, Duration::ZERO);
        let outcome = service
            .search("infinity and paradox", SearchMode::Enhanced, Some(5))
            .await
            .unwrap();
        assert!(outcome.truncated);
        assert!(outcome.fallback_reason.is_some());
        assert!(!outcome.results.is_empty());
    }

    #[tokio::test]
    async fn validation_happens_before_delegation() {
        let service = SearchService::new(engine(), None, Duration::from_secs(5));
        let err = service.search("", SearchMode::Enhanced, Some(5)).await.unwrap_err();
        assert!(matches!(err, BabelError::InvalidQuery(_)));
        let err = service.search("time", SearchMode::Precise, Some(0)).await.unwrap_err();
        assert!(matches!(err, BabelError::InvalidLimit(_)));
    }
}
