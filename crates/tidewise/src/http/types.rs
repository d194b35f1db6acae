//! HTTP API request and response types

use serde::{Deserialize, Serialize};
use tidewise_catalog::ProductRecord;
use tidewise_relevance::{SearchAnalytics, SearchResult, SortBy, Suggestion};

// ============================================
// Health & Stats
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub profile: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub profile: String,
    pub catalog_products: usize,
    pub analytics: SearchAnalytics,
    /// Absent when preferences are held in memory.
    pub store: Option<StoreSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub profiles: usize,
    pub learned_terms: usize,
    pub history_entries: usize,
}

// ============================================
// Search
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub profile: Option<String>,
    pub category: Option<String>,
    /// `[min, max]`, inclusive.
    pub price_range: Option<[f64; 2]>,
    pub in_stock_only: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total_count: usize,
    pub search_time_ms: u64,
    pub timed_out: bool,
}

// ============================================
// Suggestions
// ============================================

#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

// ============================================
// Recommendations
// ============================================

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationsRequest {
    pub profile: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub profile: String,
    pub products: Vec<ProductRecord>,
}

// ============================================
// Errors
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
