use crate::companion::CompanionMode;
use crate::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".exchanger-behaviors.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    #[serde(default)]
    pub companion: CompanionConfig,
    #[serde(default)]
    pub mocks: MocksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CompanionConfig {
    /// How synth mocks created by issuer lookups are cached
    #[serde(default)]
    pub mode: CompanionMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MocksConfig {
    /// Seed for mock addresses; the suite name is used when unset
    #[serde(default)]
    pub address_seed: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset (e.g. "debug")
    #[serde(default)]
    pub level: Option<String>,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: Option<bool>,
}

impl HarnessConfig {
    /// Load configuration from a file in the project root
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Missing files yield the default configuration
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(HarnessConfig::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            HarnessError::ConfigError(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            HarnessError::ConfigError(msg) => {
                HarnessError::ConfigError(format!("{:?}: {}", config_path, msg))
            }
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            HarnessError::ConfigError(format!("Failed to parse TOML config: {}", e))
        })
    }

    /// Load default config if file is missing, otherwise return error on parse failure
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Warning: Failed to load config: {}. Using defaults.", e);
                HarnessConfig::default()
            }
        }
    }

    pub fn with_companion_mode(mut self, mode: CompanionMode) -> Self {
        self.companion.mode = mode;
        self
    }
}
