//! Configuration management for pneumodetect.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "pneumodetect";

/// Environment variable prefix.
const ENV_PREFIX: &str = "PNEUMODETECT_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PNEUMODETECT_`)
/// 2. TOML config file at `~/.config/pneumodetect/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cough recording simulator configuration.
    pub cough: CoughConfig,
    /// Vitals stream simulator configuration.
    pub vitals: VitalsConfig,
    /// Simulated auth form configuration.
    pub auth: AuthConfig,
    /// Random source configuration.
    pub random: RandomConfig,
}

/// Cough recording simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoughConfig {
    /// How long the simulated recording lasts, in milliseconds.
    pub recording_ms: u64,
    /// How long the simulated analysis lasts, in milliseconds.
    pub analysis_ms: u64,
    /// Confidence reported with every result (0-100).
    pub confidence_percent: u8,
}

/// Vitals stream simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Interval between generated samples, in milliseconds.
    pub sample_interval_ms: u64,
}

/// Simulated auth form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Delay before a login or signup submit completes, in milliseconds.
    pub submit_delay_ms: u64,
}

/// Random source configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Fixed seed for reproducible runs. Seeded from entropy when unset.
    pub seed: Option<u64>,
}

impl Default for CoughConfig {
    fn default() -> Self {
        Self {
            recording_ms: 5_000,
            analysis_ms: 3_000,
            confidence_percent: 87,
        }
    }
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 2_000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1_000,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.cough.recording_ms == 0 {
            return Err(Error::config_validation(
                "cough.recording_ms must be greater than 0",
            ));
        }

        if self.cough.analysis_ms == 0 {
            return Err(Error::config_validation(
                "cough.analysis_ms must be greater than 0",
            ));
        }

        if self.cough.confidence_percent > 100 {
            return Err(Error::config_validation(format!(
                "cough.confidence_percent ({}) cannot exceed 100",
                self.cough.confidence_percent
            )));
        }

        // tokio intervals panic on a zero period
        if self.vitals.sample_interval_ms == 0 {
            return Err(Error::config_validation(
                "vitals.sample_interval_ms must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Get the recording duration.
    #[must_use]
    pub fn recording_duration(&self) -> Duration {
        Duration::from_millis(self.cough.recording_ms)
    }

    /// Get the analysis duration.
    #[must_use]
    pub fn analysis_duration(&self) -> Duration {
        Duration::from_millis(self.cough.analysis_ms)
    }

    /// Get the vitals sample interval.
    #[must_use]
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.vitals.sample_interval_ms)
    }

    /// Get the auth submit delay.
    #[must_use]
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.auth.submit_delay_ms)
    }
}
