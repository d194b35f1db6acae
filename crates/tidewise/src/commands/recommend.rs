//! Recommend products for a profile

use anyhow::Result;

use super::common::{open_engine, resolve_profile};
use crate::settings::Settings;

pub async fn recommend(
    settings: &Settings,
    limit: Option<usize>,
    profile: Option<String>,
    json: bool,
) -> Result<()> {
    let profile = resolve_profile(profile, settings);
    let handle = open_engine(settings)?;
    let limit = limit.map(|l| l.min(settings.engine.max_limit));

    let products = handle.engine.recommendations(&profile, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    println!("Recommendations for profile '{}'", profile);
    println!("=========================");
    for (rank, product) in products.iter().enumerate() {
        println!(
            "{:>2}. {} [{}] {} | rating {:.1} ({} reviews){}",
            rank + 1,
            product.name,
            product.id,
            product.price,
            product.rating_or_zero(),
            product.review_count(),
            if product.in_stock { "" } else { " | out of stock" }
        );
    }

    Ok(())
}
