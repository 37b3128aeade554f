//! Run configuration loaded from TOML
//!
//! ```toml
//! [physics]
//! em_module = "DNA_Opt2"
//! radioactive_decay = false
//! tracking_cut = true
//! tracking_cut_region = "World"
//! multiple_ionisation_hydrogen = true
//!
//! [stepping]
//! kill_after_first_step = false
//! ```
//!
//! Every field is optional and falls back to the defaults shown.

use crate::physics::EmPreset;
use crate::tracking_cut::DEFAULT_REGION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub em_module: String,
    pub radioactive_decay: bool,
    pub tracking_cut: bool,
    pub tracking_cut_region: String,
    pub multiple_ionisation_hydrogen: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            em_module: EmPreset::DEFAULT.name().to_string(),
            radioactive_decay: false,
            tracking_cut: false,
            tracking_cut_region: DEFAULT_REGION.to_string(),
            multiple_ionisation_hydrogen: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteppingConfig {
    /// Kill every track (and its secondaries) after its first step
    pub kill_after_first_step: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub stepping: SteppingConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.physics.em_module, "DNA_Opt2");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
[physics]
tracking_cut = true

[stepping]
kill_after_first_step = true
"#,
        )
        .unwrap();
        assert!(config.physics.tracking_cut);
        assert_eq!(config.physics.tracking_cut_region, "World");
        assert!(config.stepping.kill_after_first_step);
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = Config::from_toml_str("[physics]\ntracking_cut = \"yes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
