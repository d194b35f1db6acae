//! Autocomplete candidates scored by word overlap.

use crate::query::tokenize;
use crate::results::{Suggestion, SuggestionKind};
use crate::vocabulary::Vocabulary;
use std::collections::HashSet;
use tidewise_catalog::ProductRecord;

/// Symmetric word-overlap ratio.
///
/// Counts query words that are a substring of, or contain, any candidate
/// word, divided by the longer of the two word lists.
pub fn word_overlap(query_words: &[String], candidate_words: &[String]) -> f32 {
    if query_words.is_empty() || candidate_words.is_empty() {
        return 0.0;
    }

    let matched = query_words
        .iter()
        .filter(|q| {
            candidate_words
                .iter()
                .any(|c| c.contains(q.as_str()) || q.contains(c.as_str()))
        })
        .count();

    matched as f32 / query_words.len().max(candidate_words.len()) as f32
}

/// Top `limit` candidates for a partial query.
///
/// Category, activity and location candidates are gated on containing the
/// whole lowercased query. Product names are also admitted on any word overlap.
/// Pools are gathered in the order products, categories, activities,
/// locations, and ties keep that order.
pub fn generate(
    partial: &str,
    catalog: &[ProductRecord],
    vocabulary: &Vocabulary,
    limit: usize,
) -> Vec<Suggestion> {
    let needle = partial.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }
    let query_words = tokenize(&needle);

    let pools: [(SuggestionKind, Vec<&str>); 4] = [
        (
            SuggestionKind::Product,
            catalog.iter().map(|p| p.name.as_str()).collect(),
        ),
        (
            SuggestionKind::Category,
            vocabulary.categories.iter().map(String::as_str).collect(),
        ),
        (
            SuggestionKind::Activity,
            vocabulary.activities.iter().map(String::as_str).collect(),
        ),
        (
            SuggestionKind::Location,
            vocabulary.locations.iter().map(String::as_str).collect(),
        ),
    ];

    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for (kind, candidates) in pools {
        for candidate in candidates {
            let lowered = candidate.to_lowercase();
            let confidence = word_overlap(&query_words, &tokenize(&lowered));

            let admitted = lowered.contains(needle.as_str())
                || (kind == SuggestionKind::Product && confidence > 0.0);
            if !admitted || !seen.insert((kind, lowered)) {
                continue;
            }

            suggestions.push(Suggestion {
                text: candidate.to_string(),
                kind,
                confidence,
            });
        }
    }

    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    suggestions.truncate(limit);
    suggestions
}
