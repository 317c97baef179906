use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// CLI configuration: action shortcuts mapping a friendly name to the tag it
/// applies. User entries override the built-in defaults per key.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/texter");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn default_actions() -> BTreeMap<String, String> {
        [
            ("bold", "strong"),
            ("italic", "em"),
            ("underline", "u"),
            ("strike", "s"),
            ("link", "a"),
        ]
        .into_iter()
        .map(|(action, tag)| (action.to_string(), tag.to_string()))
        .collect()
    }

    /// Resolves an action shortcut to its tag name. Names that match no
    /// shortcut are taken as literal tag names.
    pub fn resolve(&self, name: &str) -> String {
        let name = name.to_ascii_lowercase();
        if let Some(tag) = self.actions.get(&name) {
            return tag.clone();
        }
        if let Some(tag) = Self::default_actions().get(&name) {
            return tag.clone();
        }
        name
    }
}
