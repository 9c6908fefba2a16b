//! Configuration file support for replog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/replog/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub stats: StatsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Session behavior configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Rest duration offered when a set completes, before the user picks a
    /// preset. Must be one of the rest-timer presets.
    #[serde(default = "default_rest_seconds")]
    pub default_rest_seconds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_rest_seconds: default_rest_seconds(),
        }
    }
}

/// Stats display configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Calorie estimate per minute of exercise (a rough approximation)
    #[serde(default = "default_calories_per_minute")]
    pub calories_per_minute: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            calories_per_minute: default_calories_per_minute(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("replog")
}

fn default_rest_seconds() -> u32 {
    60
}

fn default_calories_per_minute() -> f64 {
    crate::history::DEFAULT_CALORIES_PER_MINUTE
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("replog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !crate::timer::REST_PRESETS.contains(&self.session.default_rest_seconds) {
            return Err(Error::Config(format!(
                "default_rest_seconds must be one of {:?}, got {}",
                crate::timer::REST_PRESETS,
                self.session.default_rest_seconds
            )));
        }
        if self.stats.calories_per_minute < 0.0 || !self.stats.calories_per_minute.is_finite() {
            return Err(Error::Config(format!(
                "calories_per_minute must be a non-negative number, got {}",
                self.stats.calories_per_minute
            )));
        }
        Ok(())
    }

    /// Path of the durable history file under the data directory
    pub fn history_path(&self) -> PathBuf {
        self.data.data_dir.join("history.json")
    }
}
