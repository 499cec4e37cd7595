/// CatalogView Global Search
///
/// A record passes the global search when any of its globally-filterable columns
/// matches the query. Two modes exist:
///
/// - `Subsequence` (default): the lowercase column text contains the query as a
///   contiguous substring, or contains the query's characters in order with gaps
///   (skim-style scoring from `fuzzy-matcher`). When `min_score` is set, a gapped
///   match must score at least that much, which bounds how scattered it may be.
/// - `Substring`: contiguous case-insensitive containment only.
///
/// The score only decides pass/fail; it never reorders rows.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyMode {
    #[default]
    Subsequence,
    Substring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    pub mode: FuzzyMode,
    pub min_score: Option<i64>,
}

/// Matcher for one query, built once per derivation.
pub struct QueryMatcher {
    query: String,
    query_lower: String,
    config: FuzzyConfig,
    skim: SkimMatcherV2,
}

impl QueryMatcher {
    pub fn new(query: &str, config: FuzzyConfig) -> Self {
        QueryMatcher {
            query: query.to_string(),
            query_lower: query.to_lowercase(),
            config,
            skim: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// An empty query passes everything.
    pub fn is_identity(&self) -> bool {
        self.query.is_empty()
    }

    /// Score of a gapped match, or None when the text does not contain the
    /// query's characters in order.
    pub fn score(&self, text: &str) -> Option<i64> {
        self.skim.fuzzy_match(text, &self.query)
    }

    pub fn matches(&self, text: &str) -> bool {
        if self.is_identity() {
            return true;
        }
        if text.to_lowercase().contains(&self.query_lower) {
            return true;
        }
        match self.config.mode {
            FuzzyMode::Substring => false,
            FuzzyMode::Subsequence => match (self.score(text), self.config.min_score) {
                (Some(score), Some(min)) => score >= min,
                (Some(_), None) => true,
                (None, _) => false,
            },
        }
    }
}

impl std::fmt::Debug for QueryMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryMatcher")
            .field("query", &self.query)
            .field("config", &self.config)
            .finish()
    }
}
