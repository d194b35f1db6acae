//! Search history operations.

use super::SqliteStore;
use crate::history::SearchHistory;
use anyhow::Result;
use rusqlite::{OptionalExtension, params};
use tracing::debug;

impl SqliteStore {
    /// Load the history stored under `key`, most recent first.
    pub fn load_history(&self, key: &str) -> Result<Option<SearchHistory>> {
        self.with_conn(|conn| {
            let exists = conn
                .query_row(
                    "SELECT 1 FROM profiles WHERE profile_key = ?1",
                    [key],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();

            if !exists {
                return Ok(None);
            }

            let mut stmt = conn.prepare(
                "SELECT query FROM search_history WHERE profile_key = ?1 ORDER BY position",
            )?;
            let queries = stmt
                .query_map([key], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<String>, _>>()?;

            Ok(Some(SearchHistory::from_queries(queries)))
        })
    }

    /// Replace the history stored under `key` in a single transaction.
    pub fn save_history(&self, key: &str, history: &SearchHistory) -> Result<()> {
        let now = Self::now_secs();

        self.with_transaction(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO profiles (profile_key, updated_at) VALUES (?1, ?2)",
                params![key, now],
            )?;
            conn.execute("DELETE FROM search_history WHERE profile_key = ?1", [key])?;

            let mut stmt = conn.prepare(
                "INSERT INTO search_history (profile_key, position, query, recorded_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, query) in history.iter().enumerate() {
                stmt.execute(params![key, position as i64, query, now])?;
            }

            debug!(profile = key, queries = history.len(), "Saved search history");
            Ok(())
        })
    }
}
