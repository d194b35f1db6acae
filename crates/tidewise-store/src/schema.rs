use rusqlite::{Connection, Result as SqliteResult};

pub const SCHEMA_VERSION: i32 = 1;

pub fn init_schema(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        r#"
        -- Metadata table for schema versioning
        CREATE TABLE IF NOT EXISTS metadata (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- Learned term weights, one row per (profile, term)
        CREATE TABLE IF NOT EXISTS preference_weights (
            profile_key TEXT NOT NULL,
            term TEXT NOT NULL,
            weight REAL NOT NULL CHECK (weight >= 0),
            updated_at INTEGER NOT NULL,
            PRIMARY KEY (profile_key, term)
        );

        -- Search history, position 0 is the most recent query
        CREATE TABLE IF NOT EXISTS search_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            profile_key TEXT NOT NULL,
            position INTEGER NOT NULL,
            query TEXT NOT NULL,
            recorded_at INTEGER NOT NULL
        );

        -- Marks profiles that exist even with no weights yet
        CREATE TABLE IF NOT EXISTS profiles (
            profile_key TEXT PRIMARY KEY,
            updated_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_weights_profile ON preference_weights(profile_key);
        CREATE INDEX IF NOT EXISTS idx_history_profile ON search_history(profile_key, position);
        "#,
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}
