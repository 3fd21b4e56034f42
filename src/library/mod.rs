//! The Coordinate Generator: a deterministic mapping from library coordinates
//! to synthetic books.
//!
//! - [`coordinate`] — library geometry and range handling
//! - [`rng`] — the seeded, state-threading pseudorandom generator
//! - [`template`] — slot templates and the pure fill transform
//! - [`vocabulary`] — word and template tables
//! - [`generator`] — assembly of [`types::Book`] records

pub mod coordinate;
pub mod generator;
pub mod rng;
pub mod template;
pub mod types;
pub mod vocabulary;

pub use coordinate::Coordinate;
pub use generator::{generate_book, Library, YearSpan};
pub use types::{BibliographyEntry, Book, Chapter};
pub use vocabulary::Vocabulary;
