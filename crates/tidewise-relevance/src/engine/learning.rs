//! Profile and history persistence for RelevanceEngine.

use super::RelevanceEngine;
use crate::learning::apply_search_feedback;
use crate::query::Query;
use crate::results::SearchResult;
use std::sync::PoisonError;
use tidewise_store::{PreferenceProfile, SearchHistory};
use tracing::{debug, warn};

impl RelevanceEngine {
    /// Update and persist the profile and history after a search.
    ///
    /// The read-modify-write runs under the profile's lock. A failed read
    /// leaves the stored value untouched; a failed write is logged.
    pub(crate) fn record_search(&self, profile_key: &str, query: &Query, results: &[SearchResult]) {
        let lock = self.profile_lock(profile_key);
        {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.update_profile_and_history(profile_key, query, results);
        }
        self.release_profile_lock(profile_key, lock);
    }

    fn update_profile_and_history(&self, profile_key: &str, query: &Query, results: &[SearchResult]) {
        match self.store.get_profile(profile_key) {
            Ok(existing) => {
                let mut profile = existing.unwrap_or_default();
                apply_search_feedback(&mut profile, query, results, &self.config.weight_policy);

                if let Err(e) = self.store.put_profile(profile_key, &profile) {
                    warn!(profile = profile_key, "Failed to save preference profile: {:#}", e);
                } else {
                    debug!(profile = profile_key, terms = profile.len(), "Preference profile updated");
                }
            }
            Err(e) => {
                warn!(profile = profile_key, "Failed to load preference profile, skipping update: {:#}", e);
            }
        }

        match self.store.get_history(profile_key) {
            Ok(existing) => {
                let mut history = existing.unwrap_or_default();
                history.record(&query.text);

                if let Err(e) = self.store.put_history(profile_key, &history) {
                    warn!(profile = profile_key, "Failed to save search history: {:#}", e);
                }
            }
            Err(e) => {
                warn!(profile = profile_key, "Failed to load search history, skipping update: {:#}", e);
            }
        }
    }

    /// The stored profile, or an empty one when absent or unreadable.
    pub fn load_profile(&self, profile_key: &str) -> PreferenceProfile {
        match self.store.get_profile(profile_key) {
            Ok(profile) => profile.unwrap_or_default(),
            Err(e) => {
                warn!(profile = profile_key, "Failed to load preference profile: {:#}", e);
                PreferenceProfile::default()
            }
        }
    }

    /// The stored history, or an empty one when absent or unreadable.
    pub fn load_history(&self, profile_key: &str) -> SearchHistory {
        match self.store.get_history(profile_key) {
            Ok(history) => history.unwrap_or_default(),
            Err(e) => {
                warn!(profile = profile_key, "Failed to load search history: {:#}", e);
                SearchHistory::default()
            }
        }
    }
}
