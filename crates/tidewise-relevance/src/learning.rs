//! Preference learning from search activity.

use crate::query::Query;
use crate::results::SearchResult;
use tidewise_store::{PreferenceProfile, WeightPolicy};

/// Added to each query token's weight per search.
pub const QUERY_TERM_INCREMENT: f64 = 0.1;

/// Added to each tag of each returned result per search.
pub const RESULT_TAG_INCREMENT: f64 = 0.05;

/// One learning step: decay, query-token increments, result-tag increments, cap.
///
/// Runs for empty result sets too, so query terms always gain weight.
pub fn apply_search_feedback(
    profile: &mut PreferenceProfile,
    query: &Query,
    results: &[SearchResult],
    policy: &WeightPolicy,
) {
    policy.apply_decay(profile);

    for token in &query.tokens {
        profile.bump(token, QUERY_TERM_INCREMENT);
    }

    for result in results {
        for tag in &result.product.tags {
            profile.bump(tag, RESULT_TAG_INCREMENT);
        }
    }

    policy.apply_cap(profile);
}
