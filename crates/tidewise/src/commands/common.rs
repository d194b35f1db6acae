//! Common utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tidewise_catalog::JsonCatalog;
use tidewise_relevance::RelevanceEngine;
use tidewise_store::{MemoryStore, PreferenceStore, SqliteStore};
use tracing::info;

use crate::settings::{DEFAULT_CATALOG_NAME, Settings};

/// An engine plus the SQLite store behind it, when one is configured.
pub struct EngineHandle {
    pub engine: RelevanceEngine,
    pub sqlite: Option<Arc<SqliteStore>>,
}

/// Returns the catalog path, using the configured path or falling back to
/// `DEFAULT_CATALOG_NAME` in `cwd` when that file exists.
pub fn resolve_catalog_path(catalog: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(path) = catalog {
        return Ok(path.to_path_buf());
    }

    let fallback = cwd.join(DEFAULT_CATALOG_NAME);
    if fallback.exists() {
        Ok(fallback)
    } else {
        anyhow::bail!(
            "No catalog configured. Pass --catalog or set `catalog` in the settings file."
        )
    }
}

/// Resolve the profile key, falling back to the configured default.
pub fn resolve_profile(profile: Option<String>, settings: &Settings) -> String {
    profile
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| settings.default_profile.clone())
}

/// Open the configured preference store and load the catalog into an engine.
pub fn open_engine(settings: &Settings) -> Result<EngineHandle> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let catalog_path = resolve_catalog_path(settings.catalog.as_deref(), &cwd)?;

    let sqlite = match &settings.database {
        Some(path) => {
            info!("Database: {:?}", path);
            Some(Arc::new(SqliteStore::open(path)?))
        }
        None => {
            info!("No database configured, learned preferences will not persist");
            None
        }
    };

    let store: Arc<dyn PreferenceStore> = match &sqlite {
        Some(sqlite) => sqlite.clone(),
        None => Arc::new(MemoryStore::new()),
    };

    let provider = JsonCatalog::new(catalog_path);
    let engine = RelevanceEngine::with_config(&provider, store, settings.engine.clone())?;

    Ok(EngineHandle { engine, sqlite })
}
