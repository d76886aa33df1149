// Configuration module for the map tracker
// Handles loading settings from a TOML file

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::mines::MineRules;

// =============================================================================
// CONFIGURATION STRUCTURES
// =============================================================================

/// Reference-point catalog sources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON file replacing the built-in vector table (empty = use built-in)
    #[serde(default)]
    pub vectors_file: String,
    /// JSON file with per-location entries merged on top of the base table
    #[serde(default)]
    pub custom_vectors_file: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog sources
    #[serde(default)]
    pub catalog: CatalogSettings,
    /// Mine level folding rules
    #[serde(default)]
    pub mines: MineRules,
}

// =============================================================================
// ERROR HANDLING & LOADING
// =============================================================================

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// Config file does not exist
    FileNotFound(PathBuf),
    /// Failed to read the config file
    ReadError(std::io::Error),
    /// Failed to parse the config file
    ParseError(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            ConfigError::ReadError(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::ParseError(e) => write!(f, "Failed to parse config file: {}", e),
        }
    }
}

impl Config {
    /// Default config file name
    pub const CONFIG_FILENAME: &'static str = "map_tracking_config.toml";

    /// Load configuration from a TOML file.
    /// Returns an error if the file does not exist or cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}
