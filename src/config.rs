// Local configuration: a single JSON file in the user's home directory
// recording the instance URI. One config per user account; a missing file
// means "unconfigured". Concurrent invocations racing on the file are not
// supported (last writer wins).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".putconfig";

/// The persisted configuration. Kept flat so the file stays human-editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub instance_uri: String,
}

/// Reads and writes the config file at a fixed path.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by `<home>/.putconfig`. Fails if the home directory
    /// cannot be resolved.
    pub fn open_default() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
        Ok(ConfigStore {
            path: home.join(CONFIG_FILE_NAME),
        })
    }

    /// Store backed by an explicit path. Used by tests.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, distinguishing "file does not exist" from
    /// "file exists but is not valid JSON for the schema".
    pub fn load(&self) -> Result<Config> {
        let data = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::ConfigNotFound
            } else {
                Error::Io(e)
            }
        })?;
        serde_json::from_str(&data).map_err(Error::ConfigParse)
    }

    /// Serialize as indented JSON and fully replace prior contents.
    pub fn save(&self, config: &Config) -> Result<()> {
        let data =
            serde_json::to_string_pretty(config).expect("config serialization cannot fail");
        fs::write(&self.path, data).map_err(Error::ConfigWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join(".putconfig"));
        let config = Config {
            instance_uri: "https://put.example.com".into(),
        };
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn load_missing_file_is_config_not_found() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join(".putconfig"));
        assert!(matches!(store.load(), Err(Error::ConfigNotFound)));
    }

    #[test]
    fn load_rejects_malformed_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".putconfig");
        std::fs::write(&path, "not json at all").unwrap();
        let store = ConfigStore::at(path);
        assert!(matches!(store.load(), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn save_overwrites_previous_config() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join(".putconfig"));
        store
            .save(&Config {
                instance_uri: "https://old.example.com".into(),
            })
            .unwrap();
        let newer = Config {
            instance_uri: "https://new.example.com".into(),
        };
        store.save(&newer).unwrap();
        assert_eq!(store.load().unwrap(), newer);
    }

    #[test]
    fn config_file_is_a_flat_json_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".putconfig");
        let store = ConfigStore::at(&path);
        store
            .save(&Config {
                instance_uri: "https://put.example.com".into(),
            })
            .unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["instance_uri"], "https://put.example.com");
    }
}
