//! Autocomplete, recommendations and analytics for RelevanceEngine.

use super::RelevanceEngine;
use crate::analytics::SearchAnalytics;
use crate::recommend;
use crate::results::Suggestion;
use crate::suggestions;
use tidewise_catalog::ProductRecord;
use tracing::debug;

impl RelevanceEngine {
    /// Autocomplete candidates for a partial query. Read-only.
    pub fn suggestions(&self, partial: &str) -> Vec<Suggestion> {
        let suggestions = suggestions::generate(
            partial,
            &self.catalog,
            &self.config.vocabulary,
            self.config.suggestion_limit,
        );
        debug!(partial, count = suggestions.len(), "Generated suggestions");
        suggestions
    }

    /// Products ranked for a profile by rating, learned tag weights, stock
    /// and popularity. An unknown or unreadable profile counts as empty.
    pub fn recommendations(&self, profile_key: &str, limit: Option<usize>) -> Vec<ProductRecord> {
        let profile = self.load_profile(profile_key);
        let limit = limit.unwrap_or(self.config.recommendation_limit);

        let products = recommend::rank(&self.catalog, &profile, limit);
        debug!(
            profile = profile_key,
            learned_terms = profile.len(),
            count = products.len(),
            "Generated recommendations"
        );
        products
    }

    pub fn analytics(&self, profile_key: &str) -> SearchAnalytics {
        let history = self.load_history(profile_key);
        let profile = self.load_profile(profile_key);
        SearchAnalytics::build(&history, &profile)
    }
}
