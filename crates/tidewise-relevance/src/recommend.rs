//! Query-independent recommendation scoring.
//!
//! Scores live on their own scale and are never compared with search
//! relevance scores.

use tidewise_catalog::ProductRecord;
use tidewise_store::PreferenceProfile;

pub const RATING_WEIGHT: f64 = 0.3;
pub const PREFERENCE_WEIGHT: f64 = 0.4;
pub const IN_STOCK_BONUS: f64 = 0.2;
pub const POPULARITY_WEIGHT: f64 = 0.1;

/// `rating*0.3 + Σ weight[tag]*0.4 + (in stock ? 0.2 : 0) + log10(reviews+1)*0.1`
pub fn recommendation_score(product: &ProductRecord, profile: &PreferenceProfile) -> f64 {
    let rating = f64::from(product.rating_or_zero()) * RATING_WEIGHT;
    let preference: f64 = product
        .tags
        .iter()
        .map(|tag| profile.weight(tag) * PREFERENCE_WEIGHT)
        .sum();
    let stock = if product.in_stock { IN_STOCK_BONUS } else { 0.0 };
    let popularity = (f64::from(product.review_count()) + 1.0).log10() * POPULARITY_WEIGHT;

    rating + preference + stock + popularity
}

/// Top `limit` products by descending score; ties keep catalog order.
pub fn rank(
    catalog: &[ProductRecord],
    profile: &PreferenceProfile,
    limit: usize,
) -> Vec<ProductRecord> {
    let mut scored: Vec<(f64, &ProductRecord)> = catalog
        .iter()
        .map(|product| (recommendation_score(product, profile), product))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, product)| product.clone())
        .collect()
}
