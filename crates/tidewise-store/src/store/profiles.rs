//! Preference profile operations.

use super::SqliteStore;
use crate::profile::PreferenceProfile;
use anyhow::Result;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, info};

impl SqliteStore {
    /// Load the profile stored under `key`, or `None` if it was never saved.
    pub fn load_profile(&self, key: &str) -> Result<Option<PreferenceProfile>> {
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
                "SELECT term, weight FROM preference_weights WHERE profile_key = ?1",
            )?;

            let rows = stmt.query_map([key], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?;

            let mut profile = PreferenceProfile::new();
            for row in rows {
                let (term, weight) = row?;
                profile.set(&term, weight);
            }

            Ok(Some(profile))
        })
    }

    /// Replace the profile stored under `key` in a single transaction.
    pub fn save_profile(&self, key: &str, profile: &PreferenceProfile) -> Result<()> {
        let now = Self::now_secs();

        self.with_transaction(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO profiles (profile_key, updated_at) VALUES (?1, ?2)",
                params![key, now],
            )?;
            conn.execute(
                "DELETE FROM preference_weights WHERE profile_key = ?1",
                [key],
            )?;

            let mut stmt = conn.prepare(
                "INSERT INTO preference_weights (profile_key, term, weight, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (term, weight) in profile.iter() {
                stmt.execute(params![key, term, weight, now])?;
            }

            debug!(profile = key, terms = profile.len(), "Saved preference profile");
            Ok(())
        })
    }

    /// All profile keys, alphabetically.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT profile_key FROM profiles ORDER BY profile_key")?;
            let keys = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(keys)
        })
    }

    /// Delete a profile together with its weights and history.
    ///
    /// Returns whether the profile existed.
    pub fn delete_profile(&self, key: &str) -> Result<bool> {
        self.with_transaction(|conn| {
            conn.execute(
                "DELETE FROM preference_weights WHERE profile_key = ?1",
                [key],
            )?;
            conn.execute("DELETE FROM search_history WHERE profile_key = ?1", [key])?;
            let rows = conn.execute("DELETE FROM profiles WHERE profile_key = ?1", [key])?;

            if rows > 0 {
                info!(profile = key, "Deleted preference profile");
            }
            Ok(rows > 0)
        })
    }
}
