//! Application configuration.
//!
//! Persisted as JSON under `~/.crisistruth/config.json`. Every field is
//! optional; command-line flags and the environment take precedence.

use crate::consts::cli_consts::refresh::REFRESH_INTERVAL_SECS;
use crate::environment::Environment;
use crate::variant::DashboardVariant;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<DashboardVariant>,
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, otherwise returns the default.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the configuration file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Overlays the given values onto this configuration.
    pub fn merge(
        &mut self,
        api_url: Option<String>,
        refresh_interval_secs: Option<u64>,
        variant: Option<DashboardVariant>,
    ) {
        if api_url.is_some() {
            self.api_url = api_url;
        }
        if refresh_interval_secs.is_some() {
            self.refresh_interval_secs = refresh_interval_secs;
        }
        if variant.is_some() {
            self.variant = variant;
        }
    }
}

/// Returns `~/.crisistruth/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Failed to get home directory",
        )
    })?;
    Ok(home_path.join(".crisistruth").join("config.json"))
}

/// Effective runtime settings after applying flags, environment and config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: Environment,
    pub refresh_interval: Duration,
    pub variant: DashboardVariant,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub refresh_secs: Option<u64>,
    pub variant: Option<DashboardVariant>,
}

impl Settings {
    /// Resolves settings: flags first, then `env_api_url`, then the config file,
    /// then the built-in defaults. The refresh interval is at least one second.
    pub fn resolve(overrides: &Overrides, env_api_url: Option<&str>, config: &Config) -> Self {
        let environment = Environment::resolve([
            overrides.api_url.as_deref(),
            env_api_url,
            config.api_url.as_deref(),
        ]);
        let secs = overrides
            .refresh_secs
            .or(config.refresh_interval_secs)
            .unwrap_or(REFRESH_INTERVAL_SECS)
            .max(1);
        let variant = overrides.variant.or(config.variant).unwrap_or_default();

        Self {
            environment,
            refresh_interval: Duration::from_secs(secs),
            variant,
        }
    }
}
