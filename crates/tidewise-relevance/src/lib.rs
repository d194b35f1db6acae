pub mod analytics;
pub mod config;
pub mod engine;
pub mod highlight;
pub mod learning;
pub mod matchers;
pub mod pipeline;
pub mod query;
pub mod recommend;
pub mod results;
pub mod suggestions;
pub mod vocabulary;

pub use analytics::SearchAnalytics;
pub use config::EngineConfig;
pub use engine::RelevanceEngine;
pub use query::{PriceRange, Query, SearchOptions, SortBy};
pub use results::{MatchType, SearchResult, SearchResults, Suggestion, SuggestionKind};
pub use vocabulary::{RelatedTerms, Vocabulary};
