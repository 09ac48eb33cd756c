//! Global evtrack configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::storage::{DEFAULT_STORAGE_KEY, JsonFileStorage};

static DEFAULT_DATA_DIR: &str = "~/.local/share/evtrack";

pub const DEFAULT_SERVER_PORT: u16 = 4097;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

/// Configuration at ~/.config/evtrack/config.toml, overridable with
/// `EVTRACK_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrackerConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            server_port: default_server_port(),
        }
    }
}

impl TrackerConfig {
    pub fn config_path() -> TrackerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TrackerError::Config("Could not determine config directory".into()))?
            .join("evtrack");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first run.
    pub fn load() -> TrackerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load config from `path` (optional) layered with the environment.
    pub fn load_from(path: &Path) -> TrackerResult<Self> {
        Self::load_layered(path, Environment::with_prefix("EVTRACK"))
    }

    /// `EVTRACK_DATA_DIR`, `EVTRACK_STORAGE_KEY` and `EVTRACK_SERVER_PORT`
    /// win over the file.
    fn load_layered(path: &Path, env: Environment) -> TrackerResult<Self> {
        let config: TrackerConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env.try_parsing(true))
            .build()
            .map_err(|e| TrackerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TrackerError::Config(e.to_string()))?;

        if config.storage_key.trim().is_empty() {
            return Err(TrackerError::Config("storage_key must not be empty".into()));
        }

        Ok(config)
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// File storage for the configured data directory and storage key.
    pub fn storage(&self) -> JsonFileStorage {
        JsonFileStorage::new(&self.data_path(), &self.storage_key)
    }

    /// Save the current config to `path`, creating its directory if needed.
    pub fn save(&self, path: &Path) -> TrackerResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| TrackerError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| TrackerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TrackerResult<()> {
        let contents = format!(
            "\
# evtrack configuration

# Where your events are stored:
# data_dir = \"{}\"

# File name (without .json) of the event collection:
# storage_key = \"{}\"

# Port for evtrack-server:
# server_port = {}
",
            DEFAULT_DATA_DIR, DEFAULT_STORAGE_KEY, DEFAULT_SERVER_PORT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TrackerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evtrack").join("config.toml");

        TrackerConfig::create_default_config(&path).unwrap();
        let config = TrackerConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("~/.local/share/evtrack"));
        assert_eq!(config.storage_key, "events_v1");
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
    }

    #[test]
    fn test_saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = TrackerConfig {
            data_dir: dir.path().join("data"),
            storage_key: "work".into(),
            server_port: 8080,
        };

        config.save(&path).unwrap();
        let loaded = TrackerConfig::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.storage().path(), dir.path().join("data").join("work.json"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage_key = \"work\"\nserver_port = 8080\n").unwrap();

        let env: ::config::Map<String, String> = [
            ("EVTRACK_STORAGE_KEY", "home"),
            ("EVTRACK_SERVER_PORT", "9000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config =
            TrackerConfig::load_layered(&path, Environment::with_prefix("EVTRACK").source(Some(env)))
                .unwrap();

        assert_eq!(config.storage_key, "home");
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("~/.local/share/evtrack"));
    }

    #[test]
    fn test_save_creates_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evtrack").join("config.toml");
        let config = TrackerConfig {
            storage_key: "work".into(),
            ..TrackerConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(TrackerConfig::load_from(&path).unwrap().storage_key, "work");
    }

    #[test]
    fn test_blank_storage_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage_key = \"  \"\n").unwrap();

        assert!(matches!(
            TrackerConfig::load_from(&path),
            Err(TrackerError::Config(_))
        ));
    }
}
