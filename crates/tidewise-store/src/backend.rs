//! The persistence seam used by the relevance engine.

use crate::history::SearchHistory;
use crate::profile::PreferenceProfile;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Key-value persistence for preference profiles and search histories.
///
/// Keys are caller-supplied profile identifiers (a browser id, a user id).
/// A `put` replaces the whole value stored under the key.
pub trait PreferenceStore: Send + Sync {
    fn get_profile(&self, key: &str) -> Result<Option<PreferenceProfile>>;

    fn put_profile(&self, key: &str, profile: &PreferenceProfile) -> Result<()>;

    fn get_history(&self, key: &str) -> Result<Option<SearchHistory>>;

    fn put_history(&self, key: &str, history: &SearchHistory) -> Result<()>;
}

/// Process-local store; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<String, PreferenceProfile>>,
    histories: RwLock<HashMap<String, SearchHistory>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_profile(&self, key: &str) -> Result<Option<PreferenceProfile>> {
        let profiles = self.profiles.read().unwrap_or_else(PoisonError::into_inner);
        Ok(profiles.get(key).cloned())
    }

    fn put_profile(&self, key: &str, profile: &PreferenceProfile) -> Result<()> {
        let mut profiles = self.profiles.write().unwrap_or_else(PoisonError::into_inner);
        profiles.insert(key.to_string(), profile.clone());
        Ok(())
    }

    fn get_history(&self, key: &str) -> Result<Option<SearchHistory>> {
        let histories = self.histories.read().unwrap_or_else(PoisonError::into_inner);
        Ok(histories.get(key).cloned())
    }

    fn put_history(&self, key: &str, history: &SearchHistory) -> Result<()> {
        let mut histories = self.histories.write().unwrap_or_else(PoisonError::into_inner);
        histories.insert(key.to_string(), history.clone());
        Ok(())
    }
}
