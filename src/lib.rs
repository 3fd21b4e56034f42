//! A procedural Library of Babel.
//!
//! Every book in the library is addressed by a [`library::Coordinate`]
//! (hexagon, wall, shelf, volume) and is generated on demand from a seed
//! derived from that coordinate, so the same address always yields the same
//! book and nothing is ever stored. Hexagons are unbounded, which makes the
//! library infinite.
//!
//! Searching works without an index: query terms are hashed into coordinate
//! space, the books at and beside those coordinates are generated and scored,
//! and a greedy pass keeps the result list from clustering on one author,
//! genre or period.
//!
//! | Mode | Probes | Weighting |
//! |------|--------|-----------|
//! | **comprehensive** | tokens, whole query, matched concepts | balanced |
//! | **precise** | tokens only | exact matches in title/abstract, no novelty |
//! | **exploratory** | as comprehensive, one extra probe per term | heavier novelty |
//! | **enhanced** | external collaborator | falls back to comprehensive |
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`error`] — Error taxonomy and its HTTP mapping
//! - [`library`] — Deterministic coordinate-to-book generation
//! - [`search`] — The concept search engine and enhanced-mode fallback
//! - [`server`] — HTTP JSON API

pub mod config;
pub mod error;
pub mod library;
pub mod search;
pub mod server;
