//! Global calgrid configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::DATA_FILE_NAME;
use crate::error::{CalGridError, CalGridResult};
use crate::event::OverlapRule;
use crate::storage::JsonFileStorage;
use crate::store::EventStore;

const APP_DIR: &str = "calgrid";

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(DATA_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from("~/.calgrid").join(DATA_FILE_NAME))
}

/// Configuration at ~/.config/calgrid/config.toml
///
/// Every key can be overridden with a `CALGRID_` environment variable,
/// e.g. `CALGRID_OVERLAP_RULE=endpoint-only`.
#[derive(Debug, Deserialize, Clone)]
pub struct CalgridConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default)]
    pub overlap_rule: OverlapRule,
}

impl Default for CalgridConfig {
    fn default() -> Self {
        CalgridConfig {
            data_file: default_data_file(),
            overlap_rule: OverlapRule::default(),
        }
    }
}

impl CalgridConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/calgrid/config.toml, creating a commented default on
    /// first run.
    pub fn load() -> CalGridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file plus environment overrides. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("CALGRID"))
            .build()
            .map_err(|e| CalGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGridError::Config(e.to_string()))
    }

    /// `data_file` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Open the event store this configuration points at.
    pub fn open_store(&self) -> EventStore<JsonFileStorage> {
        EventStore::open(JsonFileStorage::new(self.data_path())).with_overlap_rule(self.overlap_rule)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let contents = format!(
            "\
# calgrid configuration

# Where events are stored:
# data_file = {}

# How overlapping events are detected:
#   \"half-open\"      any intersection of [start, end) is a conflict
#   \"endpoint-only\"  only a start or end inside another event conflicts
# overlap_rule = \"half-open\"
",
            // Quoted and escaped as a TOML string
            toml::Value::String(default_data_file().display().to_string())
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalgridConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.overlap_rule, OverlapRule::HalfOpen);
        assert!(config.data_file.ends_with(DATA_FILE_NAME));
    }

    #[test]
    fn commented_default_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calgrid").join("config.toml");
        CalgridConfig::create_default_config(&path).unwrap();

        let config = CalgridConfig::load_from(&path).unwrap();
        assert_eq!(config.overlap_rule, OverlapRule::HalfOpen);

        // Uncommenting the data_file line yields the default path
        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().find(|l| l.starts_with("# data_file")).unwrap();
        let uncommented: toml::Table = toml::from_str(&line[2..]).unwrap();
        assert_eq!(
            uncommented["data_file"].as_str(),
            Some(default_data_file().display().to_string().as_str())
        );
    }

    #[test]
    fn reads_saved_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_file = \"/tmp/calgrid-test/events.json\"\noverlap_rule = \"endpoint-only\"\n",
        )
        .unwrap();

        let loaded = CalgridConfig::load_from(&path).unwrap();
        assert_eq!(loaded.data_file, PathBuf::from("/tmp/calgrid-test/events.json"));
        assert_eq!(loaded.overlap_rule, OverlapRule::EndpointOnly);
    }

    #[test]
    fn rejects_unknown_overlap_rule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "overlap_rule = \"sometimes\"\n").unwrap();

        assert!(CalgridConfig::load_from(&path).is_err());
    }

    #[test]
    fn expands_tilde_in_data_path() {
        let config = CalgridConfig {
            data_file: PathBuf::from("~/calgrid/events.json"),
            overlap_rule: OverlapRule::default(),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.data_path(), home.join("calgrid/events.json"));
        }
    }

    #[test]
    fn open_store_applies_overlap_rule() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalgridConfig {
            data_file: dir.path().join("events.json"),
            overlap_rule: OverlapRule::EndpointOnly,
        };
        let store = config.open_store();
        assert_eq!(store.overlap_rule(), OverlapRule::EndpointOnly);
        assert!(store.events().is_empty());
    }
}
