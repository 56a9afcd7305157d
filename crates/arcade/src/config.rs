//! Arcade configuration file.

use arcade_core::Difficulty;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ARCADE_CONFIG";

/// Config file read when neither the flag nor the environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "arcade.toml";

/// Settings for the terminal arcade.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ArcadeConfig {
    /// File holding best records and the theme.
    #[serde(default = "default_store_path")]
    store_path: PathBuf,

    /// Tier used when `--difficulty` is not given.
    #[serde(default)]
    default_difficulty: Difficulty,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Seed used when `--seed` is not given; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// How often the play loop feeds elapsed time to the session.
    #[serde(default = "default_tick_millis")]
    tick_millis: u64,
}

#[instrument]
fn default_store_path() -> PathBuf {
    PathBuf::from("arcade_store.json")
}

#[instrument]
fn default_log_filter() -> String {
    "warn".to_string()
}

#[instrument]
fn default_tick_millis() -> u64 {
    100
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_difficulty: Difficulty::default(),
            log_filter: default_log_filter(),
            seed: None,
            tick_millis: default_tick_millis(),
        }
    }
}

impl ArcadeConfig {
    /// Reads settings from a TOML file. Keys left out take their defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(bytes = text.len(), "Read arcade settings");

        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            store = %config.store_path.display(),
            difficulty = %config.default_difficulty,
            "Arcade settings applied"
        );
        Ok(config)
    }

    /// Loads the config named by `explicit`, then `ARCADE_CONFIG`, then the
    /// default path.
    ///
    /// A named file must exist. The default file is optional; without it the
    /// built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_path(explicit, std::env::var_os(CONFIG_ENV)) {
            ConfigSource::Named(path) => Self::from_file(&path),
            ConfigSource::Default(path) if path.exists() => Self::from_file(&path),
            ConfigSource::Default(path) => {
                debug!(path = %path.display(), "No settings file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Where the config comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Named on the command line or in the environment.
    Named(PathBuf),
    /// The conventional path, which may not exist.
    Default(PathBuf),
}

fn resolve_path(explicit: Option<&Path>, env: Option<OsString>) -> ConfigSource {
    match (explicit, env) {
        (Some(path), _) => ConfigSource::Named(path.to_path_buf()),
        (None, Some(var)) if !var.is_empty() => ConfigSource::Named(PathBuf::from(var)),
        _ => ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_PATH)),
    }
}

/// A settings file that could not be used.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[display("Cannot read settings file {}: {}", path.display(), source)]
    Unreadable {
        /// File that was named.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid arcade TOML.
    #[display("Invalid settings in {}: {}", path.display(), source)]
    Invalid {
        /// File that was read.
        path: PathBuf,
        /// Parser complaint.
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("arcade.toml");
        std::fs::write(&path, "default_difficulty = \"hard\"\nseed = 17\n").unwrap();

        let config = ArcadeConfig::from_file(&path).unwrap();
        assert_eq!(*config.default_difficulty(), Difficulty::Hard);
        assert_eq!(*config.seed(), Some(17));
        assert_eq!(*config.tick_millis(), 100);
        assert_eq!(config.store_path(), &PathBuf::from("arcade_store.json"));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("arcade.toml");
        std::fs::write(&path, "tick_millis = \"soon\"").unwrap();

        let err = ArcadeConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().starts_with("Invalid settings in"));
    }

    #[test]
    fn test_named_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ArcadeConfig::load(Some(&missing)),
            Err(ConfigError::Unreadable { path, .. }) if path == missing
        ));
    }

    #[test]
    fn test_path_precedence() {
        let flag = Path::new("flag.toml");
        assert_eq!(
            resolve_path(Some(flag), Some(OsString::from("env.toml"))),
            ConfigSource::Named(PathBuf::from("flag.toml"))
        );
        assert_eq!(
            resolve_path(None, Some(OsString::from("env.toml"))),
            ConfigSource::Named(PathBuf::from("env.toml"))
        );
        assert_eq!(
            resolve_path(None, Some(OsString::new())),
            ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_PATH))
        );
        assert_eq!(
            resolve_path(None, None),
            ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_PATH))
        );
    }
}
