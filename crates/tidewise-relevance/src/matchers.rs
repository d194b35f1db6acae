//! The four independent matching strategies.
//!
//! Each matcher is a pure function over the catalog. Results are returned in
//! catalog order; within a matcher, sub-rules are emitted rule by rule so the
//! stronger rule's candidates come first.

use crate::highlight::highlight;
use crate::query::Query;
use crate::results::{MatchType, SearchResult};
use crate::vocabulary::RelatedTerms;
use tidewise_catalog::ProductRecord;

pub const EXACT_NAME_SCORE: f32 = 1.0;
pub const EXACT_DESCRIPTION_SCORE: f32 = 0.8;

pub const SEMANTIC_TOKEN_WEIGHT: f32 = 0.3;
pub const SEMANTIC_RELATED_WEIGHT: f32 = 0.1;
/// A semantic candidate must accumulate strictly more than this.
pub const SEMANTIC_MIN_SCORE: f32 = 0.2;
/// Semantic scores stay below the exact-match ceiling.
pub const SEMANTIC_MAX_SCORE: f32 = 0.9;

pub const CATEGORY_SCORE: f32 = 0.7;
pub const ACTIVITY_SCORE: f32 = 0.6;
pub const LOCATION_SCORE: f32 = 0.5;

/// Matching strategies, declared in merge priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Matcher {
    Exact,
    Semantic,
    CategoryActivity,
    Location,
}

impl Matcher {
    /// Merge order: earlier matchers win deduplication.
    pub const PRIORITY: [Matcher; 4] = [
        Matcher::Exact,
        Matcher::Semantic,
        Matcher::CategoryActivity,
        Matcher::Location,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Semantic => "semantic",
            Self::CategoryActivity => "category_activity",
            Self::Location => "location",
        }
    }

    pub fn run(
        &self,
        query: &Query,
        catalog: &[ProductRecord],
        related: &RelatedTerms,
    ) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }

        match self {
            Self::Exact => exact_matches(query, catalog),
            Self::Semantic => semantic_matches(query, catalog, related),
            Self::CategoryActivity => category_activity_matches(query, catalog),
            Self::Location => location_matches(query, catalog),
        }
    }
}

/// Case-insensitive substring match on the name (1.0), then on the
/// description (0.8). A product may be emitted by both rules.
pub fn exact_matches(query: &Query, catalog: &[ProductRecord]) -> Vec<SearchResult> {
    let needle = query.normalized.as_str();
    let mut results = Vec::new();

    for product in catalog {
        if product.name.to_lowercase().contains(needle) {
            results.push(
                SearchResult::new(product, EXACT_NAME_SCORE, MatchType::Exact)
                    .with_highlight(highlight(&product.name, needle)),
            );
        }
    }

    for product in catalog {
        if product.description.to_lowercase().contains(needle) {
            results.push(
                SearchResult::new(product, EXACT_DESCRIPTION_SCORE, MatchType::Exact)
                    .with_highlight(highlight(&product.description, needle)),
            );
        }
    }

    results
}

/// Accumulated, uncapped semantic score of a product for the query tokens.
pub fn semantic_score(query: &Query, product: &ProductRecord, related: &RelatedTerms) -> f32 {
    let haystack = product.searchable_text();
    let mut score = 0.0;

    for token in &query.tokens {
        if haystack.contains(token.as_str()) {
            score += SEMANTIC_TOKEN_WEIGHT;
        }
        for term in related.related(token) {
            if haystack.contains(term.as_str()) {
                score += SEMANTIC_RELATED_WEIGHT;
            }
        }
    }

    score
}

/// Token and related-term overlap with name, description and tags.
pub fn semantic_matches(
    query: &Query,
    catalog: &[ProductRecord],
    related: &RelatedTerms,
) -> Vec<SearchResult> {
    catalog
        .iter()
        .filter_map(|product| {
            let score = semantic_score(query, product, related);
            (score > SEMANTIC_MIN_SCORE).then(|| {
                SearchResult::new(product, score.min(SEMANTIC_MAX_SCORE), MatchType::Semantic)
            })
        })
        .collect()
}

/// Category substring match (0.7), then bidirectional activity match (0.6).
pub fn category_activity_matches(query: &Query, catalog: &[ProductRecord]) -> Vec<SearchResult> {
    let needle = query.normalized.as_str();
    let mut results = Vec::new();

    for product in catalog {
        if product.category.to_lowercase().contains(needle) {
            results.push(SearchResult::new(product, CATEGORY_SCORE, MatchType::Category));
        }
    }

    for product in catalog {
        if product
            .activities
            .iter()
            .any(|activity| facet_matches(activity, needle))
        {
            results.push(SearchResult::new(product, ACTIVITY_SCORE, MatchType::Activity));
        }
    }

    results
}

/// Bidirectional match against water-body names (0.5).
pub fn location_matches(query: &Query, catalog: &[ProductRecord]) -> Vec<SearchResult> {
    let needle = query.normalized.as_str();

    catalog
        .iter()
        .filter(|product| {
            product
                .water_bodies
                .iter()
                .any(|water_body| facet_matches(water_body, needle))
        })
        .map(|product| SearchResult::new(product, LOCATION_SCORE, MatchType::Location))
        .collect()
}

/// Either string contains the other, case-insensitively. Blank facets never match.
fn facet_matches(facet: &str, needle: &str) -> bool {
    let facet = facet.trim().to_lowercase();
    !facet.is_empty() && (facet.contains(needle) || needle.contains(facet.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shorts() -> ProductRecord {
        ProductRecord::new("shorts", "Lake Tahoe Board Shorts", "Apparel", "$45.00")
            .with_description("Quick-dry shorts for long days on the water")
            .with_tags(&["board shorts", "swimming"])
            .with_water_bodies(&["lake tahoe"])
            .with_activities(&["swimming", "wakeboarding"])
    }

    fn rod() -> ProductRecord {
        ProductRecord::new("rod", "Trout Rod", "Fishing", "$89.00")
            .with_description("Light rod for lake fishing")
            .with_tags(&["fishing", "trout"])
            .with_water_bodies(&["Flathead Lake"])
            .with_activities(&["fishing"])
    }

    #[test]
    fn test_exact_name_match() {
        let catalog = vec![shorts(), rod()];
        let results = exact_matches(&Query::new("board shorts"), &catalog);

        assert_eq!(results[0].id(), "shorts");
        assert_eq!(results[0].score, EXACT_NAME_SCORE);
        assert_eq!(
            results[0].highlighted.as_deref(),
            Some("Lake Tahoe <mark>Board Shorts</mark>")
        );
    }

    #[test]
    fn test_exact_emits_name_and_description_candidates() {
        let catalog = vec![shorts()];
        let results = exact_matches(&Query::new("shorts"), &catalog);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].score, EXACT_NAME_SCORE);
        assert_eq!(results[1].score, EXACT_DESCRIPTION_SCORE);
        assert!(results.iter().all(|r| r.match_type == MatchType::Exact));
    }

    #[test]
    fn test_exact_description_only() {
        let catalog = vec![rod()];
        let results = exact_matches(&Query::new("LAKE FISHING"), &catalog);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, EXACT_DESCRIPTION_SCORE);
        assert_eq!(
            results[0].highlighted.as_deref(),
            Some("Light rod for <mark>lake fishing</mark>")
        );
    }

    #[test]
    fn test_semantic_expands_related_terms() {
        let catalog = vec![shorts()];
        let related = RelatedTerms::builtin();
        let results = semantic_matches(&Query::new("swim"), &catalog, &related);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_type, MatchType::Semantic);
        // "swim" (0.3) + "swimming" (0.1) + "water" (0.1) + "lake" (0.1)
        assert!((results[0].score - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_semantic_score_is_capped() {
        let catalog = vec![shorts()];
        let related = RelatedTerms::builtin();
        let query = Query::new("swim swimming shorts board lake");

        assert!(semantic_score(&query, &catalog[0], &related) > SEMANTIC_MAX_SCORE);
        let results = semantic_matches(&query, &catalog, &related);
        assert_eq!(results[0].score, SEMANTIC_MAX_SCORE);
    }

    #[test]
    fn test_semantic_requires_more_than_threshold() {
        let product = ProductRecord::new("towel", "Beach Towel", "Accessories", "$15")
            .with_description("Soft and absorbent");
        let mut extra = std::collections::HashMap::new();
        extra.insert(
            "xyz".to_string(),
            vec!["beach".to_string(), "towel".to_string()],
        );
        let related = RelatedTerms::new().with_extra(&extra);

        // Two related hits accumulate exactly 0.2, which does not qualify.
        let results = semantic_matches(&Query::new("xyz"), &[product], &related);
        assert!(results.is_empty());
    }

    #[test]
    fn test_category_and_activity_candidates() {
        let catalog = vec![shorts(), rod()];
        let results = category_activity_matches(&Query::new("fishing"), &catalog);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].match_type, MatchType::Category);
        assert_eq!(results[0].score, CATEGORY_SCORE);
        assert_eq!(results[1].match_type, MatchType::Activity);
        assert_eq!(results[1].score, ACTIVITY_SCORE);
    }

    #[test]
    fn test_activity_match_is_bidirectional() {
        let catalog = vec![shorts()];
        let results = category_activity_matches(&Query::new("wakeboarding lessons"), &catalog);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_type, MatchType::Activity);
    }

    #[test]
    fn test_location_match_is_bidirectional() {
        let catalog = vec![shorts(), rod()];

        let results = location_matches(&Query::new("Tahoe"), &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), "shorts");
        assert_eq!(results[0].score, LOCATION_SCORE);

        let results = location_matches(&Query::new("trip to flathead lake"), &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), "rod");
    }

    #[test]
    fn test_blank_facets_never_match() {
        let product = ProductRecord::new("p", "Hat", "Apparel", "$10").with_water_bodies(&[" "]);
        assert!(location_matches(&Query::new("anything"), &[product]).is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let catalog = vec![shorts(), rod()];
        let related = RelatedTerms::builtin();
        for matcher in Matcher::PRIORITY {
            assert!(matcher.run(&Query::new("  "), &catalog, &related).is_empty());
        }
    }
}
