//! Aggregates over search history and learned weights. Never used for ranking.

use serde::{Deserialize, Serialize};
use tidewise_store::{PreferenceProfile, SearchHistory};

/// Number of entries reported in each top list.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalytics {
    pub total_searches: usize,
    pub unique_queries: usize,
    pub top_queries: Vec<(String, usize)>,
    pub top_terms: Vec<(String, f64)>,
}

impl SearchAnalytics {
    pub fn build(history: &SearchHistory, profile: &PreferenceProfile) -> Self {
        let counts = history.query_counts();
        let unique_queries = counts.len();

        let mut top_queries: Vec<(String, usize)> = counts.into_iter().collect();
        top_queries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_queries.truncate(TOP_N);

        Self {
            total_searches: history.len(),
            unique_queries,
            top_queries,
            top_terms: profile.top_terms(TOP_N),
        }
    }
}
