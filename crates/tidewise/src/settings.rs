//! File-based settings for the tidewise binary.
//!
//! Settings come from a TOML file (`--config`, or `tidewise.toml` in the
//! working directory when present). Global CLI flags override file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tidewise_relevance::EngineConfig;
use tracing::debug;

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "tidewise.toml";

/// Catalog file looked up in the working directory.
pub const DEFAULT_CATALOG_NAME: &str = "catalog.json";

pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path to the JSON product catalog.
    pub catalog: Option<PathBuf>,
    /// SQLite database for learned preferences. Absent means in-memory.
    pub database: Option<PathBuf>,
    /// Profile key used when a request names none.
    pub default_profile: String,
    pub engine: EngineConfig,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub port: u16,
    pub cors_origin: Option<String>,
    pub search_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            database: None,
            default_profile: DEFAULT_PROFILE.to_string(),
            engine: EngineConfig::default(),
            http: HttpSettings::default(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            cors_origin: None,
            search_timeout_ms: DEFAULT_SEARCH_TIMEOUT_MS,
        }
    }
}

impl HttpSettings {
    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }
}

impl Settings {
    /// Load settings from `path`, or from the default file if it exists.
    ///
    /// An explicit path must exist. Without one, a missing default file
    /// yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = std::env::current_dir()
                    .context("Failed to get current directory")?
                    .join(DEFAULT_CONFIG_NAME);
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    debug!("No {} found, using default settings", DEFAULT_CONFIG_NAME);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let mut settings = Self::from_toml(&raw)
            .with_context(|| format!("Invalid settings file {:?}", path))?;

        // Relative paths in the file are relative to the file itself.
        if let Some(base) = path.parent() {
            settings.catalog = settings.catalog.map(|p| base.join(p));
            settings.database = settings.database.map(|p| base.join(p));
        }

        debug!(path = ?path, "Loaded settings");
        Ok(settings)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let settings: Self = toml::from_str(raw).context("Failed to parse TOML settings")?;
        settings
            .engine
            .weight_policy
            .validate()
            .context("Invalid [engine.weight_policy]")?;
        Ok(settings)
    }

    /// Apply the global CLI overrides.
    pub fn with_overrides(mut self, catalog: Option<PathBuf>, database: Option<PathBuf>) -> Self {
        if catalog.is_some() {
            self.catalog = catalog;
        }
        if database.is_some() {
            self.database = database;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.catalog, None);
        assert_eq!(settings.database, None);
        assert_eq!(settings.default_profile, "default");
        assert_eq!(settings.http.port, 8080);
        assert_eq!(settings.http.search_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_full_toml() {
        let settings = Settings::from_toml(
            r#"
            catalog = "data/catalog.json"
            database = "prefs.db"
            default_profile = "guest"

            [engine]
            default_limit = 20
            parallel_matchers = true

            [engine.weight_policy]
            decay = 0.9
            cap = 5.0

            [engine.related_terms]
            tube = ["tubing", "towable"]

            [http]
            port = 9000
            cors_origin = "https://shop.example.com"
            search_timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(settings.catalog, Some(PathBuf::from("data/catalog.json")));
        assert_eq!(settings.database, Some(PathBuf::from("prefs.db")));
        assert_eq!(settings.default_profile, "guest");
        assert_eq!(settings.engine.default_limit, 20);
        assert_eq!(settings.engine.max_limit, 1000);
        assert!(settings.engine.parallel_matchers);
        assert_eq!(settings.engine.weight_policy.decay, 0.9);
        assert_eq!(settings.engine.weight_policy.cap, Some(5.0));
        assert_eq!(settings.engine.related_terms["tube"], vec!["tubing", "towable"]);
        assert_eq!(settings.http.port, 9000);
        assert_eq!(settings.http.search_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Settings::from_toml("default_profile = [").is_err());
        assert!(Settings::from_toml("[http]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_profile = \"diver\"").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.default_profile, "diver");
    }

    #[test]
    fn test_invalid_weight_policy_is_rejected() {
        assert!(Settings::from_toml("[engine.weight_policy]\ndecay = nan").is_err());
        assert!(Settings::from_toml("[engine.weight_policy]\ndecay = 2.0").is_err());
        assert!(Settings::from_toml("[engine.weight_policy]\ncap = -1.0").is_err());
        assert!(Settings::from_toml("[engine.weight_policy]\ndecay = 0.5").is_ok());
    }

    #[test]
    fn test_file_paths_resolve_against_file_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tidewise.toml");
        fs::write(
            &path,
            "catalog = \"catalog.json\"\ndatabase = \"data/prefs.db\"\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.catalog, Some(dir.path().join("catalog.json")));
        assert_eq!(settings.database, Some(dir.path().join("data/prefs.db")));
    }

    #[test]
    fn test_absolute_file_paths_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("elsewhere").join("catalog.json");
        let path = dir.path().join("tidewise.toml");
        fs::write(&path, format!("catalog = {:?}\n", catalog.to_string_lossy())).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.catalog, Some(catalog));
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings {
            catalog: Some(PathBuf::from("a.json")),
            database: Some(PathBuf::from("a.db")),
            ..Settings::default()
        };

        let settings = settings.with_overrides(Some(PathBuf::from("b.json")), None);
        assert_eq!(settings.catalog, Some(PathBuf::from("b.json")));
        assert_eq!(settings.database, Some(PathBuf::from("a.db")));
    }
}
