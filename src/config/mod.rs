// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the trainer.
//!
//! Settings load from YAML, or TOML when the file ends in `.toml`. Every
//! field has a default, so an empty file is a valid config.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::TrainerError;
use crate::generators::{ProgressionConfig, DEFAULT_COMMON_PROBABILITY, DEFAULT_WEIGHTS};
use crate::music::{KeyName, Numeral};

/// Longest progression the trainer will quiz on
pub const MAX_CHORDS: usize = 16;

/// Root configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TrainerFile {
    /// Quiz settings
    #[serde(default)]
    pub trainer: TrainerSettings,
    /// Progression generator tuning
    #[serde(default)]
    pub generator: GeneratorSettings,
    /// Log output
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl TrainerFile {
    /// Load a configuration file, choosing the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let config = if is_toml {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };

        config
            .validate()
            .with_context(|| format!("Invalid settings in {:?}", path))?;
        Ok(config)
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check every value that the core would otherwise reject at runtime
    pub fn validate(&self) -> std::result::Result<(), TrainerError> {
        self.trainer.key()?;

        if self.trainer.num_chords > MAX_CHORDS {
            return Err(TrainerError::InvalidConfig(format!(
                "num_chords must be at most {}, got {}",
                MAX_CHORDS, self.trainer.num_chords
            )));
        }
        if self.trainer.tick_millis == 0 {
            return Err(TrainerError::InvalidConfig(
                "tick_millis must be positive".to_string(),
            ));
        }

        self.generator.progression_config().validate()?;
        self.logging.level()?;
        Ok(())
    }
}

/// Quiz settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerSettings {
    /// Starting key (e.g., "C", "G")
    #[serde(default = "default_key")]
    pub key: String,
    /// Chords per progression
    #[serde(default = "default_num_chords")]
    pub num_chords: usize,
    /// Seconds per question, 0 for untimed
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,
    /// Countdown refresh interval in milliseconds
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

fn default_key() -> String {
    "C".to_string()
}
fn default_num_chords() -> usize {
    4
}
fn default_time_limit_secs() -> u64 {
    10
}
fn default_tick_millis() -> u64 {
    100
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            key: default_key(),
            num_chords: default_num_chords(),
            time_limit_secs: default_time_limit_secs(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl TrainerSettings {
    /// Starting key, validated against the key table
    pub fn key(&self) -> std::result::Result<KeyName, TrainerError> {
        KeyName::parse(&self.key)
    }

    /// Per-question limit, `None` when the quiz is untimed
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_secs > 0).then(|| Duration::from_secs(self.time_limit_secs))
    }

    /// Countdown refresh interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

/// Progression generator tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorSettings {
    /// Chance of a curated progression for four-chord requests
    #[serde(default = "default_common_probability")]
    pub common_probability: f64,
    /// Fallback weight per numeral; unlisted numerals are never drawn
    #[serde(default = "default_weights")]
    pub weights: BTreeMap<Numeral, u32>,
}

fn default_common_probability() -> f64 {
    DEFAULT_COMMON_PROBABILITY
}
fn default_weights() -> BTreeMap<Numeral, u32> {
    DEFAULT_WEIGHTS.iter().copied().collect()
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            common_probability: default_common_probability(),
            weights: default_weights(),
        }
    }
}

impl GeneratorSettings {
    /// Convert to the generator's own config type
    pub fn progression_config(&self) -> ProgressionConfig {
        ProgressionConfig {
            common_probability: self.common_probability,
            weights: self.weights.iter().map(|(&n, &w)| (n, w)).collect(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Maximum level: trace, debug, info, warn or error
    #[serde(default = "default_level")]
    pub level: String,
    /// Log file used while the terminal UI is running
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LoggingSettings {
    /// Parsed log level
    pub fn level(&self) -> std::result::Result<Level, TrainerError> {
        self.level
            .parse()
            .map_err(|_| TrainerError::InvalidConfig(format!("unknown log level '{}'", self.level)))
    }
}
