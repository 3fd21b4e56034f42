use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use super::rate_limit::RateLimiter;
use crate::config::{BabelConfig, LibraryMode};
use crate::library::{Library, Vocabulary};
use crate::search::enhanced::ExternalSearch;
use crate::search::{SearchEngine, SearchMode, SearchService};

/// Shared, read-only application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BabelConfig,
    library: Arc<Library>,
    search: SearchService,
    limiter: RateLimiter,
}

impl AppState {
    /// Build state from config, loading a custom vocabulary if one is configured.
    pub fn new(config: BabelConfig) -> Result<Self> {
        let vocabulary = match config.resolved_vocabulary_path() {
            Some(path) => Vocabulary::load(path)?,
            None => Vocabulary::builtin().context("built-in vocabulary is invalid")?,
        };
        Self::with_vocabulary(config, vocabulary)
    }

    pub fn with_vocabulary(config: BabelConfig, vocabulary: Vocabulary) -> Result<Self> {
        let library = Arc::new(Library::new(
            config.library.base_seed.clone(),
            Arc::new(vocabulary),
            config.year_span(),
        ));
        let engine = Arc::new(SearchEngine::new(
            Arc::clone(&library),
            config.search.clone(),
        ));
        let external = ExternalSearch::from_config(&config.enhanced)
            .context("failed to set up enhanced search client")?;
        if let Some(ext) = &external {
            tracing::info!(url = %ext.url(), "enhanced search collaborator configured");
        }
        let search = SearchService::new(
            engine,
            external,
            Duration::from_millis(config.server.request_timeout_ms),
        );
        let limiter = RateLimiter::new(&config.rate_limit);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                library,
                search,
                limiter,
            }),
        })
    }

    pub fn config(&self) -> &BabelConfig {
        &self.inner.config
    }

    pub fn library(&self) -> &Library {
        &self.inner.library
    }

    pub fn library_arc(&self) -> Arc<Library> {
        Arc::clone(&self.inner.library)
    }

    pub fn search(&self) -> &SearchService {
        &self.inner.search
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.inner.limiter
    }

    /// Mode used when a search request names none.
    pub fn default_mode(&self) -> SearchMode {
        match self.inner.config.library.mode {
            LibraryMode::Enhanced => SearchMode::Enhanced,
            LibraryMode::Educational => SearchMode::Comprehensive,
        }
    }
}
