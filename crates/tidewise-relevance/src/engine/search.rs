//! Search functionality for RelevanceEngine.

use super::RelevanceEngine;
use crate::matchers::Matcher;
use crate::pipeline::{apply_filters, merge_and_dedup, sort_results};
use crate::query::{Query, SearchOptions};
use crate::results::{SearchResult, SearchResults};
use std::thread;
use std::time::Instant;
use tidewise_catalog::ProductRecord;
use tracing::{debug, info, warn};

impl RelevanceEngine {
    /// Perform a multi-strategy search and learn from it.
    ///
    /// Never fails: persistence problems are logged and the results are still
    /// returned. Empty queries return no results and are not recorded.
    pub fn search(
        &self,
        profile_key: &str,
        query_text: &str,
        options: &SearchOptions,
    ) -> SearchResults {
        let start = Instant::now();
        let query = Query::new(query_text);

        if query.is_empty() {
            debug!("Empty query, returning no results");
            return SearchResults::empty(query_text);
        }

        let results = self.rank(&query, options);
        self.record_search(profile_key, &query, &results);

        let search_time = start.elapsed().as_millis() as u64;
        info!(
            query = %query_text,
            profile = profile_key,
            results = results.len(),
            time_ms = search_time,
            "Search completed"
        );
        SearchResults::new(query_text.to_string(), results, search_time)
    }

    /// Match, merge, filter, sort and truncate without touching any stored state.
    pub fn rank(&self, query: &Query, options: &SearchOptions) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }

        let limit = self.config.effective_limit(options.limit);
        if let Some(requested) = options.limit
            && requested > self.config.max_limit
        {
            warn!(
                requested,
                max = self.config.max_limit,
                "Requested limit exceeds maximum, capping to {}",
                self.config.max_limit
            );
        }

        let batches = self.run_matchers(query);
        let merged = merge_and_dedup(batches);
        let merged_count = merged.len();

        let mut results = apply_filters(merged, options);
        debug!(
            merged = merged_count,
            filtered = results.len(),
            "Applied search filters"
        );

        sort_results(&mut results, options.sort_by);
        results.truncate(limit);
        results
    }

    /// Run every matcher and return their outputs in priority order.
    pub(crate) fn run_matchers(&self, query: &Query) -> Vec<Vec<SearchResult>> {
        let catalog: &[ProductRecord] = &self.catalog;
        let related = &self.related;

        let batches: Vec<Vec<SearchResult>> = if self.config.parallel_matchers {
            thread::scope(|scope| {
                let handles: Vec<_> = Matcher::PRIORITY
                    .into_iter()
                    .map(|matcher| scope.spawn(move || matcher.run(query, catalog, related)))
                    .collect();

                // Joined in spawn order, which is priority order.
                handles
                    .into_iter()
                    .zip(Matcher::PRIORITY)
                    .map(|(handle, matcher)| {
                        handle.join().unwrap_or_else(|_| {
                            warn!(matcher = matcher.name(), "Matcher thread panicked");
                            Vec::new()
                        })
                    })
                    .collect()
            })
        } else {
            Matcher::PRIORITY
                .iter()
                .map(|matcher| matcher.run(query, catalog, related))
                .collect()
        };

        for (matcher, batch) in Matcher::PRIORITY.iter().zip(&batches) {
            debug!(matcher = matcher.name(), candidates = batch.len(), "Matcher finished");
        }

        batches
    }
}
