//! The Concept Search Engine.
//!
//! There is no index: a query is hashed into coordinates, the books at and
//! around those coordinates are generated on the spot, scored, diversified
//! and ranked. Identical `(query, mode, max_results)` always rank identically.
//!
//! - [`query`] — validation and tokenization
//! - [`probe`] — unsigned term hashing and coordinate derivation
//! - [`scoring`] — token-overlap relevance
//! - [`diversity`] — greedy re-ranking under author/genre/period constraints
//! - [`engine`] — the synchronous pipeline
//! - [`enhanced`] — the external collaborator client
//! - [`service`] — async entry point with deadline and fallback policy

pub mod diversity;
pub mod engine;
pub mod enhanced;
pub mod mode;
pub mod probe;
pub mod query;
pub mod scoring;
pub mod service;

pub use engine::{Budget, SearchEngine, SearchOutcome, SearchResult};
pub use mode::SearchMode;
pub use service::SearchService;
