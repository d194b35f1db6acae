//! Relevance and personalization engine for product catalogs.
//!
//! This module provides the `RelevanceEngine` which combines multiple matching
//! strategies (exact, semantic, category/activity, location) into a unified
//! search interface, and serves autocomplete and learned recommendations from
//! the same catalog snapshot.

mod discovery;
mod learning;
mod search;

use crate::config::EngineConfig;
use crate::vocabulary::RelatedTerms;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tidewise_catalog::{CatalogProvider, ProductRecord};
use tidewise_store::PreferenceStore;
use tracing::info;

/// The main search, suggestion and recommendation engine.
pub struct RelevanceEngine {
    pub(crate) catalog: Arc<[ProductRecord]>,
    pub(crate) store: Arc<dyn PreferenceStore>,
    pub(crate) related: RelatedTerms,
    pub(crate) config: EngineConfig,
    /// One mutex per profile key, serializing profile read-modify-write.
    profile_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RelevanceEngine {
    /// Create an engine with the default configuration.
    pub fn new(provider: &dyn CatalogProvider, store: Arc<dyn PreferenceStore>) -> Result<Self> {
        Self::with_config(provider, store, EngineConfig::default())
    }

    /// Create an engine, loading the catalog once from `provider`.
    pub fn with_config(
        provider: &dyn CatalogProvider,
        store: Arc<dyn PreferenceStore>,
        config: EngineConfig,
    ) -> Result<Self> {
        let products = provider
            .load_catalog()
            .context("Failed to load product catalog")?;

        let related = RelatedTerms::builtin().with_extra(&config.related_terms);

        info!(
            products = products.len(),
            related_terms = related.len(),
            parallel_matchers = config.parallel_matchers,
            "Relevance engine ready"
        );

        Ok(Self {
            catalog: products.into(),
            store,
            related,
            config,
            profile_locks: Mutex::new(HashMap::new()),
        })
    }

    /// The catalog snapshot loaded at construction.
    pub fn catalog(&self) -> &[ProductRecord] {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn PreferenceStore> {
        &self.store
    }

    /// The lock guarding one profile key, created on first use.
    pub(crate) fn profile_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .profile_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    /// Drop the map entry for `key` once `lock` is its last outside holder.
    ///
    /// Must be called after the guard on `lock` is released.
    pub(crate) fn release_profile_lock(&self, key: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self
            .profile_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one held by the caller.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(key);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_profile_locks(&self) -> usize {
        self.profile_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
