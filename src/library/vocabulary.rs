//! Vocabulary tables that feed the generator.
//!
//! A [`Vocabulary`] is built once at startup, either from the built-in tables
//! or from a TOML file, validated, and then shared read-only.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::template::Template;
use crate::error::BabelError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub concepts: Vec<WeightedTerm>,
    pub fields: Vec<WeightedTerm>,
    pub adjectives: Vec<String>,
    pub genres: Vec<String>,
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub publishers: Vec<String>,
    pub title_templates: Vec<Template>,
    pub abstract_templates: Vec<Template>,
    pub chapter_title_templates: Vec<Template>,
    pub sentence_templates: Vec<Template>,
    pub citation_templates: Vec<Template>,
    #[serde(skip)]
    concept_weights: Vec<u32>,
    #[serde(skip)]
    field_weights: Vec<u32>,
}

impl Vocabulary {
    /// The tables this library ships with.
    pub fn builtin() -> Result<Self, BabelError> {
        let vocab = Self {
            concepts: weighted(CONCEPTS),
            fields: weighted(FIELDS),
            adjectives: owned(ADJECTIVES),
            genres: owned(GENRES),
            first_names: owned(FIRST_NAMES),
            last_names: owned(LAST_NAMES),
            publishers: owned(PUBLISHERS),
            title_templates: templates(TITLE_TEMPLATES)?,
            abstract_templates: templates(ABSTRACT_TEMPLATES)?,
            chapter_title_templates: templates(CHAPTER_TITLE_TEMPLATES)?,
            sentence_templates: templates(SENTENCE_TEMPLATES)?,
            citation_templates: templates(CITATION_TEMPLATES)?,
            concept_weights: Vec::new(),
            field_weights: Vec::new(),
        };
        vocab.validated()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, BabelError> {
        let vocab: Vocabulary =
            toml::from_str(source).map_err(|e| BabelError::Vocabulary(e.to_string()))?;
        vocab.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read vocabulary file {}", path.display()))?;
        let vocab = Self::from_toml_str(&contents)
            .with_context(|| format!("invalid vocabulary file {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            concepts = vocab.concepts.len(),
            fields = vocab.fields.len(),
            "custom vocabulary loaded"
        );
        Ok(vocab)
    }

    /// Check every table is usable and cache pick weights.
    fn validated(mut self) -> Result<Self, BabelError> {
        let tables: [(&str, usize); 12] = [
            ("concepts", self.concepts.len()),
            ("fields", self.fields.len()),
            ("adjectives", self.adjectives.len()),
            ("genres", self.genres.len()),
            ("first_names", self.first_names.len()),
            ("last_names", self.last_names.len()),
            ("publishers", self.publishers.len()),
            ("title_templates", self.title_templates.len()),
            ("abstract_templates", self.abstract_templates.len()),
            ("chapter_title_templates", self.chapter_title_templates.len()),
            ("sentence_templates", self.sentence_templates.len()),
            ("citation_templates", self.citation_templates.len()),
        ];
        if let Some((name, _)) = tables.iter().find(|(_, len)| *len == 0) {
            return Err(BabelError::Vocabulary(format!("table {name} is empty")));
        }
        if self.concepts.iter().all(|t| t.weight == 0) {
            return Err(BabelError::Vocabulary("all concept weights are zero".into()));
        }
        if self.fields.iter().all(|t| t.weight == 0) {
            return Err(BabelError::Vocabulary("all field weights are zero".into()));
        }
        if self.sentence_templates.iter().all(|t| t.slots().count() == 0) {
            return Err(BabelError::Vocabulary(
                "sentence templates must use at least one slot".into(),
            ));
        }

        self.concept_weights = self.concepts.iter().map(|t| t.weight).collect();
        self.field_weights = self.fields.iter().map(|t| t.weight).collect();
        Ok(self)
    }

    pub fn concept_weights(&self) -> &[u32] {
        &self.concept_weights
    }

    pub fn field_weights(&self) -> &[u32] {
        &self.field_weights
    }

    pub fn concept_names(&self) -> Vec<&str> {
        self.concepts.iter().map(|t| t.term.as_str()).collect()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|t| t.term.as_str()).collect()
    }

    /// Concepts sharing a word with the query tokens, in table order.
    pub fn matching_concepts<'a>(&'a self, tokens: &[String]) -> Vec<&'a str> {
        self.concepts
            .iter()
            .map(|t| t.term.as_str())
            .filter(|concept| {
                concept
                    .split(|c: char| !c.is_alphanumeric())
                    .filter(|w| w.len() >= 4)
                    .any(|w| tokens.iter().any(|t| t.eq_ignore_ascii_case(w)))
            })
            .collect()
    }
}

fn weighted(items: &[(&str, u32)]) -> Vec<WeightedTerm> {
    items
        .iter()
        .map(|(term, weight)| WeightedTerm {
            term: (*term).to_string(),
            weight: *weight,
        })
        .collect()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn templates(items: &[&str]) -> Result<Vec<Template>, BabelError> {
    items.iter().map(|s| Template::parse(s)).collect()
}

// ── Built-in tables ───────────────────────────────────────────────────────────

const CONCEPTS: &[(&str, u32)] = &[
    ("infinity", 5),
    ("paradox", 5),
    ("recursion", 4),
    ("time", 4),
    ("memory", 4),
    ("labyrinth", 4),
    ("mirror", 3),
    ("identity", 3),
    ("consciousness", 3),
    ("language", 4),
    ("meaning", 3),
    ("chaos", 2),
    ("order", 2),
    ("entropy", 2),
    ("symmetry", 2),
    ("knowledge", 3),
    ("truth", 3),
    ("fiction", 2),
    ("dreams", 3),
    ("eternity", 2),
    ("the void", 2),
    ("self-reference", 3),
    ("causality", 2),
    ("emergence", 2),
    ("information", 3),
    ("complexity", 2),
    ("silence", 1),
    ("the archive", 2),
    ("translation", 2),
    ("forgetting", 2),
    ("the infinite regress", 1),
    ("chance", 2),
    ("the universal library", 1),
];

const FIELDS: &[(&str, u32)] = &[
    ("philosophy", 5),
    ("mathematics", 4),
    ("linguistics", 3),
    ("literature", 4),
    ("cosmology", 2),
    ("logic", 3),
    ("cognitive science", 2),
    ("information theory", 2),
    ("history", 3),
    ("theology", 1),
    ("semiotics", 2),
    ("computer science", 2),
    ("physics", 2),
    ("cartography", 1),
    ("library science", 2),
    ("aesthetics", 1),
];

const ADJECTIVES: &[&str] = &[
    "infinite",
    "recursive",
    "forgotten",
    "hidden",
    "circular",
    "luminous",
    "fragmentary",
    "hexagonal",
    "secret",
    "labyrinthine",
    "impossible",
    "eternal",
    "silent",
    "apocryphal",
    "inverted",
    "perfect",
    "total",
    "symmetrical",
    "unwritten",
    "ancient",
    "speculative",
    "paradoxical",
];

const GENRES: &[&str] = &[
    "Treatise",
    "Essay Collection",
    "Monograph",
    "Commentary",
    "Dialogue",
    "Encyclopedia Fragment",
    "Annotated Translation",
    "Critical Edition",
    "Lecture Series",
    "Apocrypha",
];

const FIRST_NAMES: &[&str] = &[
    "Adelina", "Baltasar", "Cesare", "Dorotea", "Elias", "Fermina", "Gaspar", "Herminia",
    "Ireneo", "Julia", "Kasimir", "Leonor", "Marcelo", "Nora", "Octavio", "Pilar", "Quentin",
    "Rosalind", "Silvina", "Tadeo", "Ursula", "Victoria", "Wendell", "Ximena", "Ysolde",
    "Zacarias",
];

const LAST_NAMES: &[&str] = &[
    "Ashe", "Bioy", "Cartaphilus", "Dahlmann", "Escher", "Funes", "Gödel", "Herbert",
    "Ibarra", "Jaromir", "Kircher", "Lönnrot", "Menard", "Nolan", "Orbis", "Pessoa",
    "Quain", "Red Scharlach", "Silva", "Tzinacán", "Uqbar", "Valéry", "Wilkins", "Yu Tsun",
    "Zunz",
];

const PUBLISHERS: &[&str] = &[
    "Hexagon Press",
    "Tlön University Press",
    "The Crimson Hexagon",
    "Orbis Tertius Editions",
    "Uqbar Academic",
    "Sur Publishing House",
    "Babel & Sons",
    "Circular Ruins Books",
    "Aleph House",
    "The Garden of Forking Paths",
    "Infinite Shelf Publishers",
    "Mirror & Encyclopedia",
];

const TITLE_TEMPLATES: &[&str] = &[
    "The {Adjective} {Concept}",
    "On {Concept} and {Concept}",
    "{Concept} in {Field}: A {Adjective} Inquiry",
    "Toward a {Adjective} Theory of {Concept}",
    "The {Concept} of {Concept}",
    "{Adjective} Foundations of {Field}",
    "Notes on {Concept}, After {Scholar}",
    "A Treatise on the {Adjective} {Concept}",
    "{Concept} and the Limits of {Field}",
    "The {Scholar} Problem: {Concept} Reconsidered",
    "Essays on {Adjective} {Concept}",
    "{Field} Beyond {Concept}",
];

const ABSTRACT_TEMPLATES: &[&str] = &[
    "This work examines the {adjective} relationship between {concept} and {concept} within {field}.",
    "Drawing on the neglected writings of {Scholar}, it argues that {concept} cannot be separated from {concept}.",
    "The author proposes a {adjective} model in which {concept} becomes the organising principle of {field}.",
    "Particular attention is given to the {adjective} structure of {concept} as it appears in the hexagonal galleries.",
    "It concludes that every account of {concept} presupposes a {adjective} theory of {concept}.",
    "Through a series of {adjective} thought experiments, the book reframes {field} as a study of {concept}.",
    "The argument moves from {field} to {field}, tracing how {concept} resists every {adjective} classification.",
];

const CHAPTER_TITLE_TEMPLATES: &[&str] = &[
    "The {Adjective} {Concept}",
    "{Concept} and Its Discontents",
    "On the Nature of {Concept}",
    "{Scholar} and the {Adjective} Gallery",
    "{Concept} as Method",
    "Interlude: {Adjective} {Concept}",
    "The {Field} of {Concept}",
    "Against {Adjective} {Concept}",
    "Fragments Concerning {Concept}",
];

const SENTENCE_TEMPLATES: &[&str] = &[
    "Every {adjective} account of {concept} eventually returns to the question of {concept}.",
    "{Scholar} once observed that {concept} is merely {concept} seen from another hexagon.",
    "In {field}, the notion of {concept} has always been {adjective}.",
    "We may therefore treat {concept} as a {adjective} variation on {concept}.",
    "The librarians of the third gallery argued that {concept} precedes {field} itself.",
    "No catalogue of {concept} can be complete, for the catalogue is itself an instance of {concept}.",
    "It follows that {field} is less a discipline than a {adjective} map of {concept}.",
    "The {adjective} symmetry between {concept} and {concept} has rarely been noticed.",
    "A {adjective} reading of {Scholar} suggests that {concept} was never lost, only misfiled.",
    "Consider a volume that describes {concept} perfectly yet is indistinguishable from noise.",
    "Critics in {field} have dismissed {concept} as {adjective}, but the evidence is mixed.",
    "Somewhere on a {adjective} shelf there is a vindication of {concept} and its refutation.",
    "The history of {concept} is, in the end, a history of {adjective} errors.",
    "If {concept} is infinite, then {concept} must be periodic.",
    "{Scholar} spent a lifetime searching for the {adjective} book that explains {concept}.",
    "Here the boundary between {field} and {field} becomes {adjective}.",
    "To speak of {concept} is already to presuppose {concept}.",
    "The {adjective} traveller will find that {concept} repeats in the same disorder.",
];

const CITATION_TEMPLATES: &[&str] = &[
    "{Concept} and {Concept}",
    "The {Adjective} {Concept}",
    "Studies in {Field}",
    "A Commentary on {Scholar}",
    "{Concept}: Collected Lectures",
    "Prolegomena to {Adjective} {Field}",
    "Remarks on {Concept}",
];
