//! Post-matching stages: merge/dedup, filter and sort.

use crate::query::{SearchOptions, SortBy};
use crate::results::SearchResult;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Concatenates matcher outputs in the given (priority) order and keeps the
/// first candidate seen for each product id. Later candidates are dropped,
/// not combined.
pub fn merge_and_dedup<I>(batches: I) -> Vec<SearchResult>
where
    I: IntoIterator<Item = Vec<SearchResult>>,
{
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|result| seen.insert(result.product.id.clone()))
        .collect()
}

/// Whether a result passes every requested filter.
pub fn passes_filters(result: &SearchResult, options: &SearchOptions) -> bool {
    let product = &result.product;

    if let Some(category) = options.effective_category()
        && product.category != category
    {
        return false;
    }

    if let Some(range) = options.price_range {
        match product.parsed_price() {
            Some(price) if range.contains(price) => {}
            _ => return false,
        }
    }

    if options.in_stock_only && !product.in_stock {
        return false;
    }

    true
}

pub fn apply_filters(results: Vec<SearchResult>, options: &SearchOptions) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|r| passes_filters(r, options))
        .collect()
}

/// Stable sort by the requested criterion; ties keep their input order.
pub fn sort_results(results: &mut [SearchResult], sort_by: SortBy) {
    match sort_by {
        SortBy::Relevance => results.sort_by(|a, b| b.score.total_cmp(&a.score)),
        SortBy::Price => results.sort_by(|a, b| compare_price(a, b)),
        SortBy::Rating => results.sort_by(|a, b| {
            b.product
                .rating_or_zero()
                .total_cmp(&a.product.rating_or_zero())
        }),
        SortBy::Popularity => {
            results.sort_by(|a, b| b.product.review_count().cmp(&a.product.review_count()))
        }
    }
}

/// Ascending price; unparseable prices sort last.
fn compare_price(a: &SearchResult, b: &SearchResult) -> Ordering {
    match (a.product.parsed_price(), b.product.parsed_price()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::MatchType;
    use tidewise_catalog::ProductRecord;

    fn result(id: &str, score: f32, match_type: MatchType) -> SearchResult {
        SearchResult::new(
            &ProductRecord::new(id, id, "Gear", "$10.00"),
            score,
            match_type,
        )
    }

    fn priced(id: &str, price: &str) -> SearchResult {
        SearchResult::new(
            &ProductRecord::new(id, id, "Gear", price),
            0.5,
            MatchType::Exact,
        )
    }

    #[test]
    fn test_first_occurrence_wins() {
        let merged = merge_and_dedup(vec![
            vec![result("a", 0.8, MatchType::Exact)],
            vec![
                result("a", 0.9, MatchType::Semantic),
                result("b", 0.4, MatchType::Semantic),
            ],
            vec![result("b", 0.7, MatchType::Category)],
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id(), "a");
        assert_eq!(merged[0].match_type, MatchType::Exact);
        assert_eq!(merged[0].score, 0.8);
        assert_eq!(merged[1].match_type, MatchType::Semantic);
    }

    #[test]
    fn test_category_filter_and_sentinel() {
        let mut apparel = result("a", 1.0, MatchType::Exact);
        apparel.product.category = "Apparel".to_string();
        let gear = result("b", 1.0, MatchType::Exact);

        let filtered = apply_filters(
            vec![apparel.clone(), gear.clone()],
            &SearchOptions::new().with_category("Apparel"),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id(), "a");

        let all = apply_filters(
            vec![apparel, gear],
            &SearchOptions::new().with_category("all"),
        );
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_price_filter_excludes_unparseable() {
        let results = vec![
            priced("cheap", "$5.00"),
            priced("mid", "$25.00"),
            priced("unknown", "ask in store"),
        ];

        let filtered = apply_filters(results, &SearchOptions::new().with_price_range(5.0, 25.0));
        let ids: Vec<&str> = filtered.iter().map(SearchResult::id).collect();
        assert_eq!(ids, vec!["cheap", "mid"]);
    }

    #[test]
    fn test_unparseable_price_kept_without_range() {
        let filtered = apply_filters(vec![priced("unknown", "TBD")], &SearchOptions::new());
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_in_stock_filter() {
        let mut sold_out = result("sold_out", 1.0, MatchType::Exact);
        sold_out.product.in_stock = false;
        let available = result("available", 1.0, MatchType::Exact);

        let filtered = apply_filters(
            vec![sold_out.clone(), available.clone()],
            &SearchOptions::new().with_in_stock_only(true),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id(), "available");

        let unfiltered = apply_filters(vec![sold_out, available], &SearchOptions::new());
        assert_eq!(unfiltered.len(), 2);
    }

    #[test]
    fn test_sort_by_relevance_is_stable() {
        let mut results = vec![
            result("first", 0.5, MatchType::Location),
            result("top", 1.0, MatchType::Exact),
            result("second", 0.5, MatchType::Location),
        ];
        sort_results(&mut results, SortBy::Relevance);

        let ids: Vec<&str> = results.iter().map(SearchResult::id).collect();
        assert_eq!(ids, vec!["top", "first", "second"]);
    }

    #[test]
    fn test_sort_by_price_ascending_unparseable_last() {
        let mut results = vec![
            priced("unknown", "n/a"),
            priced("pricey", "$300"),
            priced("cheap", "$12.50"),
        ];
        sort_results(&mut results, SortBy::Price);

        let ids: Vec<&str> = results.iter().map(SearchResult::id).collect();
        assert_eq!(ids, vec!["cheap", "pricey", "unknown"]);
    }

    #[test]
    fn test_sort_by_rating_and_popularity_default_zero() {
        let mut rated = result("rated", 0.1, MatchType::Location);
        rated.product.rating = Some(4.0);
        rated.product.reviews = Some(3);
        let mut popular = result("popular", 0.1, MatchType::Location);
        popular.product.rating = Some(3.5);
        popular.product.reviews = Some(900);
        let unrated = result("unrated", 1.0, MatchType::Exact);

        let mut by_rating = vec![unrated.clone(), popular.clone(), rated.clone()];
        sort_results(&mut by_rating, SortBy::Rating);
        let ids: Vec<&str> = by_rating.iter().map(SearchResult::id).collect();
        assert_eq!(ids, vec!["rated", "popular", "unrated"]);

        let mut by_popularity = vec![unrated, rated, popular];
        sort_results(&mut by_popularity, SortBy::Popularity);
        let ids: Vec<&str> = by_popularity.iter().map(SearchResult::id).collect();
        assert_eq!(ids, vec!["popular", "rated", "unrated"]);
    }
}
