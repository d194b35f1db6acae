//! Autocomplete a partial query

use anyhow::Result;

use super::common::open_engine;
use crate::settings::Settings;

pub async fn suggest(settings: &Settings, partial: &str, json: bool) -> Result<()> {
    let handle = open_engine(settings)?;
    let suggestions = handle.engine.suggestions(partial);

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No suggestions for '{}'", partial);
        return Ok(());
    }

    println!("Suggestions for '{}':", partial);
    for suggestion in &suggestions {
        println!(
            "  {} ({:?}, confidence: {:.2})",
            suggestion.text, suggestion.kind, suggestion.confidence
        );
    }

    Ok(())
}
