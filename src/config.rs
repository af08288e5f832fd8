use std::io::Read;
use std::path::Path;

use crate::error::ConfigError;

/// Settings for the terminal front end.
///
/// ```toml
/// size = 4
/// seed = 42          # omit for a fresh random game each run
/// log_level = "info"
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    #[serde(default = "defaults::size")]
    pub size: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { size: defaults::size(), seed: None, log_level: defaults::log_level() }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::InvalidSize);
        }
        Ok(())
    }
}

mod defaults {
    pub fn size() -> usize {
        4
    }

    pub fn log_level() -> String {
        "warn".to_string()
    }
}
