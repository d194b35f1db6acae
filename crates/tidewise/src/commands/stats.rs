//! Show learned preferences and store statistics

use anyhow::Result;

use super::common::{open_engine, resolve_profile};
use crate::settings::Settings;

pub async fn stats(settings: &Settings, profile: Option<String>, json: bool) -> Result<()> {
    let profile = resolve_profile(profile, settings);
    let handle = open_engine(settings)?;
    let analytics = handle.engine.analytics(&profile);

    if json {
        println!("{}", serde_json::to_string_pretty(&analytics)?);
        return Ok(());
    }

    println!("Tidewise Statistics");
    println!("===================");
    println!("Catalog products: {}", handle.engine.catalog().len());

    match handle.sqlite {
        Some(ref store) => {
            let store_stats = store.get_stats()?;
            println!("Database: {:?}", store.db_path());
            println!("  Profiles: {}", store_stats.profile_count);
            println!("  Learned terms: {}", store_stats.term_count);
            println!("  History entries: {}", store_stats.history_count);
        }
        None => println!("Database: (in-memory, nothing persisted)"),
    }

    println!();
    println!("Profile '{}':", profile);
    println!("  Searches: {}", analytics.total_searches);
    println!("  Unique queries: {}", analytics.unique_queries);

    println!();
    println!("  Top queries:");
    if analytics.top_queries.is_empty() {
        println!("    (none yet)");
    }
    for (query, count) in &analytics.top_queries {
        println!("    {}: {}", query, count);
    }

    println!();
    println!("  Top terms:");
    if analytics.top_terms.is_empty() {
        println!("    (none yet)");
    }
    for (term, weight) in &analytics.top_terms {
        println!("    {}: {:.2}", term, weight);
    }

    Ok(())
}
