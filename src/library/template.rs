//! Slot templates for titles, sentences and citations.
//!
//! A template such as `"The {Adjective} {Concept} in {field}"` parses into a
//! sequence of [`Node`]s: literal text and typed slots. Filling is a pure
//! transform over the node list: the caller supplies one word per slot, in
//! order, and the template only handles placement and casing. Slot names are
//! matched case-insensitively; a capitalised slot name requests title case.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BabelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Concept,
    Field,
    Adjective,
    /// A scholar's surname, drawn from the author name tables.
    Scholar,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Field => "field",
            Self::Adjective => "adjective",
            Self::Scholar => "scholar",
        }
    }
}

impl FromStr for SlotKind {
    type Err = BabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "concept" => Ok(Self::Concept),
            "field" => Ok(Self::Field),
            "adjective" => Ok(Self::Adjective),
            "scholar" => Ok(Self::Scholar),
            other => Err(BabelError::Template(format!("unknown slot {{{other}}}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    AsIs,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Slot { kind: SlotKind, case: Case },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, BabelError> {
        let mut nodes = Vec::new();
        let mut text = String::new();
        let mut chars = source.char_indices();

        while let Some((start, c)) = chars.next() {
            match c {
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(BabelError::Template(format!(
                                    "nested brace at byte {start} in {source:?}"
                                )))
                            }
                            c => name.push(c),
                        }
                    }
                    if !closed {
                        return Err(BabelError::Template(format!(
                            "unclosed slot at byte {start} in {source:?}"
                        )));
                    }
                    let kind: SlotKind = name.trim().parse()?;
                    let case = if name.trim().starts_with(|c: char| c.is_ascii_uppercase()) {
                        Case::Title
                    } else {
                        Case::AsIs
                    };
                    if !text.is_empty() {
                        nodes.push(Node::Text(std::mem::take(&mut text)));
                    }
                    nodes.push(Node::Slot { kind, case });
                }
                '}' => {
                    return Err(BabelError::Template(format!(
                        "stray '}}' at byte {start} in {source:?}"
                    )))
                }
                c => text.push(c),
            }
        }
        if !text.is_empty() {
            nodes.push(Node::Text(text));
        }
        if nodes.is_empty() {
            return Err(BabelError::Template("empty template".into()));
        }

        Ok(Self {
            source: source.to_string(),
            nodes,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Slot kinds in the order [`Template::fill_with`] will request them.
    pub fn slots(&self) -> impl Iterator<Item = SlotKind> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            Node::Slot { kind, .. } => Some(*kind),
            Node::Text(_) => None,
        })
    }

    /// Render the template, asking `pick` for one word per slot in order.
    pub fn fill_with<F>(&self, mut pick: F) -> String
    where
        F: FnMut(SlotKind) -> String,
    {
        let mut out = String::with_capacity(self.source.len() + 32);
        for node in &self.nodes {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Slot { kind, case } => {
                    let word = pick(*kind);
                    match case {
                        Case::AsIs => out.push_str(&word),
                        Case::Title => out.push_str(&title_case(&word)),
                    }
                }
            }
        }
        out
    }
}

impl TryFrom<String> for Template {
    type Error = BabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Template::parse(&value)
    }
}

impl From<Template> for String {
    fn from(t: Template) -> Self {
        t.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Uppercase the first letter of every space- or hyphen-separated word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c == ' ' || c == '-';
    }
    out
}

/// Uppercase the first character only.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
