use serde::{Deserialize, Serialize};
use std::fmt;
use tidewise_catalog::ProductRecord;

/// Which matcher produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Semantic,
    Category,
    Activity,
    Location,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Semantic => "semantic",
            Self::Category => "category",
            Self::Activity => "activity",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product together with the signal that matched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub product: ProductRecord,
    /// Per-matcher relevance; comparable only within a single search.
    pub score: f32,
    pub match_type: MatchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<String>,
}

impl SearchResult {
    pub fn new(product: &ProductRecord, score: f32, match_type: MatchType) -> Self {
        Self {
            product: product.clone(),
            score,
            match_type,
            highlighted: None,
        }
    }

    pub fn with_highlight(mut self, highlighted: String) -> Self {
        self.highlighted = Some(highlighted);
        self
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total_count: usize,
    pub search_time_ms: u64,
}

impl SearchResults {
    pub fn new(query: String, results: Vec<SearchResult>, search_time_ms: u64) -> Self {
        let total_count = results.len();
        Self {
            query,
            results,
            total_count,
            search_time_ms,
        }
    }

    pub fn empty(query: &str) -> Self {
        Self::new(query.to_string(), Vec::new(), 0)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn top(&self, n: usize) -> Vec<&SearchResult> {
        self.results.iter().take(n).collect()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.results.iter().map(SearchResult::id).collect()
    }
}

/// Source pool of an autocomplete candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Product,
    Category,
    Activity,
    Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub kind: SuggestionKind,
    pub confidence: f32,
}
