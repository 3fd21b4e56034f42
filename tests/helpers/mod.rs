#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use babel::config::BabelConfig;
use babel::library::{Library, Vocabulary, YearSpan};
use babel::search::{SearchEngine, SearchResult};
use babel::server::AppState;

pub const TEST_SEED: &str = "borges-1962";

/// Fixed so results don't drift when the calendar year changes.
pub const TEST_YEARS: YearSpan = YearSpan {
    earliest: 1850,
    latest: 2025,
};

/// A small vocabulary whose output is easy to recognise in assertions.
pub const TINY_VOCABULARY: &str = r#"
adjectives = ["odd"]
genres = ["Pamphlet"]
first_names = ["Ada"]
last_names = ["Lovelace"]
publishers = ["Engine Press"]
title_templates = ["The {Adjective} {Concept}"]
abstract_templates = ["A study of {concept} in {field}."]
chapter_title_templates = ["On {Concept}"]
sentence_templates = ["The {adjective} {concept} of {field} turns again."]
citation_templates = ["Notes on {Field}"]

[[concepts]]
term = "gears"
weight = 3

[[fields]]
term = "engineering"
"#;

/// Default config with the year span pinned and rate limiting off.
pub fn test_config() -> BabelConfig {
    let mut config = BabelConfig::default();
    config.library.latest_year = TEST_YEARS.latest;
    config.rate_limit.enabled = false;
    config
}

pub fn test_library() -> Arc<Library> {
    let vocab = Arc::new(Vocabulary::builtin().unwrap());
    Arc::new(Library::new(TEST_SEED, vocab, TEST_YEARS))
}

pub fn test_engine() -> SearchEngine {
    SearchEngine::new(test_library(), test_config().search)
}

/// Serve the full API on an ephemeral port. The server lives until the test runtime ends.
pub async fn spawn_server(config: BabelConfig) -> SocketAddr {
    let state = AppState::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(babel::server::run(listener, state, std::future::pending()));
    addr
}

/// A stand-in external search collaborator that answers `POST /search`
/// with `results` after waiting `delay`.
pub async fn spawn_collaborator(delay: Duration, results: Vec<SearchResult>) -> SocketAddr {
    let app = Router::new().route(
        "/search",
        post(move || {
            let results = results.clone();
            async move {
                tokio::time::sleep(delay).await;
                Json(json!({ "results": results }))
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}
