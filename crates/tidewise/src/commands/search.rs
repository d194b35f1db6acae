//! Search the catalog and learn from the query

use anyhow::Result;
use tidewise_relevance::{SearchOptions, SortBy};

use super::common::{open_engine, resolve_profile};
use crate::settings::Settings;

/// Filters and ordering collected from the command line.
#[derive(Debug, Default)]
pub struct SearchArgs {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: bool,
    pub sort: SortBy,
    pub limit: Option<usize>,
}

impl SearchArgs {
    /// A lone bound leaves the other side open.
    pub fn to_options(&self) -> Result<SearchOptions> {
        let mut options = SearchOptions::new()
            .with_in_stock_only(self.in_stock)
            .with_sort_by(self.sort);

        if let Some(ref category) = self.category {
            options = options.with_category(category);
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let min = self.min_price.unwrap_or(0.0);
            let max = self.max_price.unwrap_or(f64::MAX);
            if min.is_nan() || max.is_nan() || min > max {
                anyhow::bail!("Invalid price range: min {} is greater than max {}", min, max);
            }
            options = options.with_price_range(min, max);
        }

        if let Some(limit) = self.limit {
            options = options.with_limit(limit);
        }

        Ok(options)
    }
}

pub async fn search(
    settings: &Settings,
    query: &str,
    args: SearchArgs,
    profile: Option<String>,
    json: bool,
) -> Result<()> {
    let options = args.to_options()?;
    let profile = resolve_profile(profile, settings);
    let handle = open_engine(settings)?;

    let results = handle.engine.search(&profile, query, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!(
        "Search results for '{}' ({} ms)",
        query, results.search_time_ms
    );
    println!("Found {} results\n", results.total_count);

    for result in &results.results {
        let product = &result.product;
        println!(
            "{} [{}] {} (score: {:.2}, {})",
            product.name, product.id, product.price, result.score, result.match_type
        );
        println!(
            "   {} | rating {:.1} ({} reviews) | {}",
            product.category,
            product.rating_or_zero(),
            product.review_count(),
            if product.in_stock { "in stock" } else { "out of stock" }
        );
        if let Some(ref highlighted) = result.highlighted {
            println!("   {}", highlighted);
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewise_relevance::PriceRange;

    #[test]
    fn test_default_args() {
        let options = SearchArgs::default().to_options().unwrap();
        assert_eq!(options, SearchOptions::new());
    }

    #[test]
    fn test_full_args() {
        let args = SearchArgs {
            category: Some("Boats".to_string()),
            min_price: Some(100.0),
            max_price: Some(500.0),
            in_stock: true,
            sort: SortBy::Rating,
            limit: Some(3),
        };

        let options = args.to_options().unwrap();
        assert_eq!(options.category.as_deref(), Some("Boats"));
        assert_eq!(options.price_range, Some(PriceRange::new(100.0, 500.0)));
        assert!(options.in_stock_only);
        assert_eq!(options.sort_by, SortBy::Rating);
        assert_eq!(options.limit, Some(3));
    }

    #[test]
    fn test_single_price_bound() {
        let args = SearchArgs {
            max_price: Some(50.0),
            ..SearchArgs::default()
        };
        let range = args.to_options().unwrap().price_range.unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 50.0);

        let args = SearchArgs {
            min_price: Some(50.0),
            ..SearchArgs::default()
        };
        let range = args.to_options().unwrap().price_range.unwrap();
        assert!(range.contains(10_000.0));
    }

    #[test]
    fn test_inverted_price_range_rejected() {
        let args = SearchArgs {
            min_price: Some(80.0),
            max_price: Some(20.0),
            ..SearchArgs::default()
        };
        assert!(args.to_options().is_err());
    }
}
