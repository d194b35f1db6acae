//! SQLite-based storage for learned preferences.
//!
//! This module provides the `SqliteStore` type for persisting preference
//! profiles and search histories keyed by profile identifier.

mod history;
mod profiles;

use crate::backend::PreferenceStore;
use crate::history::SearchHistory;
use crate::profile::PreferenceProfile;
use crate::schema::init_schema;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// SQLite-backed `PreferenceStore`.
pub struct SqliteStore {
    pub(crate) conn: Arc<Mutex<Connection>>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create a preference database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {:?}", path))?;

        // Enable WAL mode for better concurrency
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA busy_timeout=5000;",
        )?;

        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: path.to_path_buf(),
        })
    }

    /// Open an in-memory database (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Get the path to the database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Helper function to safely acquire the connection lock with proper error handling.
    pub(crate) fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e: PoisonError<MutexGuard<Connection>>| {
                anyhow!("Database lock poisoned: {}", e)
            })?;
        f(&conn)
    }

    /// Runs `f` inside an immediate transaction, rolling back on error.
    pub(crate) fn with_transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        self.with_conn(|conn| {
            conn.execute("BEGIN IMMEDIATE", [])?;

            match f(conn) {
                Ok(value) => {
                    conn.execute("COMMIT", [])?;
                    Ok(value)
                }
                Err(e) => {
                    let _ = conn.execute("ROLLBACK", []);
                    Err(e)
                }
            }
        })
    }

    /// Get store statistics.
    pub fn get_stats(&self) -> Result<StoreStats> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM profiles) as profile_count,
                    (SELECT COUNT(*) FROM preference_weights) as term_count,
                    (SELECT COUNT(*) FROM search_history) as history_count",
                [],
                |row| {
                    Ok(StoreStats {
                        profile_count: row.get::<_, i64>(0)? as usize,
                        term_count: row.get::<_, i64>(1)? as usize,
                        history_count: row.get::<_, i64>(2)? as usize,
                    })
                },
            )
            .map_err(Into::into)
        })
    }

    pub(crate) fn now_secs() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

impl PreferenceStore for SqliteStore {
    fn get_profile(&self, key: &str) -> Result<Option<PreferenceProfile>> {
        self.load_profile(key)
    }

    fn put_profile(&self, key: &str, profile: &PreferenceProfile) -> Result<()> {
        self.save_profile(key, profile)
    }

    fn get_history(&self, key: &str) -> Result<Option<SearchHistory>> {
        self.load_history(key)
    }

    fn put_history(&self, key: &str, history: &SearchHistory) -> Result<()> {
        self.save_history(key, history)
    }
}

/// Statistics about the store.
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub profile_count: usize,
    pub term_count: usize,
    pub history_count: usize,
}
