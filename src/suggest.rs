//! Per-keystroke suggestion pipeline built on the trie queries.
//!
//! Exact hit first, then completions of the typed prefix, then (for queries
//! long enough to be worth it) submatches topped up with cost-ordered
//! corrections.

use std::borrow::Cow;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::trie::{Correction, Trie};

/// Knobs for [`Trie::suggest`], loadable from TOML.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// When false, [`Trie::suggest`] lowercases the query before any lookup,
    /// on top of the trie's own [`Trie::set_case_sensitive`] policy.
    pub case_sensitive: bool,
    pub max_completions: usize,
    pub max_submatches: usize,
    /// Shortest query (in characters) for which submatches and corrections
    /// are attempted.
    pub min_fuzzy_len: usize,
    pub max_cost: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            max_completions: 5,
            max_submatches: 5,
            min_fuzzy_len: 4,
            max_cost: 2,
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path.as_ref())?)
    }
}

/// Outcome of one suggestion round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Suggestions {
    /// The query was empty.
    Empty,
    /// The query is itself a dictionary word.
    Exact(String),
    /// The query is a prefix; these are words below it.
    Completions(Vec<String>),
    /// The query is not a prefix but long enough for inexact matching.
    /// Corrections are only computed when submatches did not fill the budget.
    Fuzzy {
        submatches: Vec<String>,
        corrections: Vec<Correction>,
    },
    /// Short query with no prefix match.
    Unmatched,
}

impl Suggestions {
    /// Flattened words in display order.
    pub fn words(&self) -> Vec<&str> {
        match self {
            Suggestions::Empty | Suggestions::Unmatched => Vec::new(),
            Suggestions::Exact(word) => vec![word.as_str()],
            Suggestions::Completions(words) => words.iter().map(String::as_str).collect(),
            Suggestions::Fuzzy {
                submatches,
                corrections,
            } => {
                let mut words: Vec<&str> = submatches.iter().map(String::as_str).collect();
                for c in corrections {
                    if !submatches.contains(&c.word) {
                        words.push(&c.word);
                    }
                }
                words
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words().is_empty()
    }
}

impl Trie {
    /// Run the suggestion pipeline for `query`.
    pub fn suggest(&self, query: &str, config: &SearchConfig) -> Result<Suggestions> {
        if query.is_empty() {
            return Ok(Suggestions::Empty);
        }
        let query: Cow<'_, str> = if config.case_sensitive {
            Cow::Borrowed(query)
        } else {
            Cow::Owned(query.to_lowercase())
        };
        let query = query.as_ref();

        let suggestions = match self.lookup_node(query)? {
            Some(node) if node.is_final() => Suggestions::Exact(self.fold(query).into_owned()),
            Some(node) => {
                Suggestions::Completions(self.lookup_completions(node, config.max_completions)?)
            }
            None if query.chars().count() >= config.min_fuzzy_len => {
                let submatches = self.lookup_submatches(query, config.max_submatches)?;
                let corrections = if submatches.len() < config.max_submatches {
                    self.corrections(query, config.max_cost)?
                } else {
                    Vec::new()
                };
                Suggestions::Fuzzy {
                    submatches,
                    corrections,
                }
            }
            None => Suggestions::Unmatched,
        };

        tracing::debug!(query, results = suggestions.words().len(), "suggest");
        Ok(suggestions)
    }
}
