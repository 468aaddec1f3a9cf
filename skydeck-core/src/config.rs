use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    fetch::RetrySettings, geo::ConfiguredGeolocator, model::Coordinates,
    provider::openweather::DEFAULT_BASE_URL,
};

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5"
///
/// [retry]
/// max_retries = 3
/// initial_delay_ms = 1000
///
/// [home]
/// latitude = 40.71
/// longitude = -74.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub retry: RetrySettings,

    /// Used by `--here` in place of a device location service.
    #[serde(default)]
    pub home: Option<Coordinates>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            retry: RetrySettings::default(),
            home: None,
        }
    }
}

impl Config {
    /// Load config from disk (or defaults on first run) and apply the
    /// environment override.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_from(&Self::config_file_path()?)?;
        cfg.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(read_toml(path)?.unwrap_or_default())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        write_toml(path, self)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// A non-empty override replaces whatever key was loaded from disk.
    pub fn apply_api_key_override(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.set_api_key(key);
        }
    }

    pub fn geolocator(&self) -> ConfiguredGeolocator {
        ConfiguredGeolocator::new(self.home)
    }
}

/// Platform config directory shared by the config and preferences files.
pub fn config_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "skydeck", "skydeck")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

    Ok(dirs.config_dir().to_path_buf())
}

/// `Ok(None)` when the file does not exist yet.
pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let value = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse file: {}", path.display()))?;

    Ok(Some(value))
}

pub(crate) fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let toml = toml::to_string_pretty(value).context("Failed to serialize to TOML")?;

    fs::write(path, toml).with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
