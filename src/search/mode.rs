use serde::{Deserialize, Serialize};

use crate::error::BabelError;

/// How a query is explored and weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Balanced weights; probes tokens, the whole query and matched concepts.
    Comprehensive,
    /// Exact matches in title and abstract dominate; tokens only, no novelty.
    Precise,
    /// Extra probes per term and a heavier novelty term.
    Exploratory,
    /// Delegates to the external search collaborator, falling back to
    /// `Comprehensive` when it is unavailable.
    Enhanced,
}

/// Weights for the components of a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub title: f64,
    pub summary: f64,
    pub chapters: f64,
    pub exact: f64,
    pub novelty: f64,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        Self::Comprehensive,
        Self::Precise,
        Self::Exploratory,
        Self::Enhanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Precise => "precise",
            Self::Exploratory => "exploratory",
            Self::Enhanced => "enhanced",
        }
    }

    /// The mode the procedural engine actually runs for this request.
    pub fn procedural(&self) -> SearchMode {
        match self {
            Self::Enhanced => Self::Comprehensive,
            other => *other,
        }
    }

    pub fn weights(&self) -> ScoreWeights {
        match self.procedural() {
            Self::Precise => ScoreWeights {
                title: 0.45,
                summary: 0.3,
                chapters: 0.15,
                exact: 0.1,
                novelty: 0.0,
            },
            Self::Exploratory => ScoreWeights {
                title: 0.35,
                summary: 0.25,
                chapters: 0.2,
                exact: 0.0,
                novelty: 0.2,
            },
            _ => ScoreWeights {
                title: 0.4,
                summary: 0.3,
                chapters: 0.2,
                exact: 0.05,
                novelty: 0.1,
            },
        }
    }

    /// Whether the whole query and matching vocabulary concepts are probed
    /// in addition to individual tokens.
    pub fn expands_terms(&self) -> bool {
        !matches!(self.procedural(), Self::Precise)
    }

    pub fn extra_probes(&self) -> u32 {
        match self.procedural() {
            Self::Exploratory => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchMode {
    type Err = BabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comprehensive" => Ok(Self::Comprehensive),
            "precise" => Ok(Self::Precise),
            "exploratory" => Ok(Self::Exploratory),
            "enhanced" => Ok(Self::Enhanced),
            other => Err(BabelError::InvalidMode(format!(
                "{other:?} (expected comprehensive, precise, exploratory or enhanced)"
            ))),
        }
    }
}
