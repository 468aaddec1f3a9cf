//! User preferences that survive between runs: favorite cities, the last
//! city shown and the selected unit system.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    config::{config_dir, read_toml, write_toml},
    units::UnitSystem,
};

pub const DEFAULT_CITY: &str = "New York";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Preferences {
    pub units: UnitSystem,
    pub last_city: Option<String>,
    pub favorites: Vec<String>,
}

impl Preferences {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(read_toml(path)?.unwrap_or_default())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        write_toml(path, self)
    }

    pub fn file_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("preferences.toml"))
    }

    /// City to show when none was given.
    pub fn start_city(&self) -> &str {
        self.last_city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    pub fn remember_city(&mut self, city: &str) {
        self.last_city = Some(city.to_string());
    }

    /// City names compare case-insensitively; the spelling saved first wins.
    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorites.iter().any(|f| same_city(f, city))
    }

    /// Add or remove `city`. Returns whether it is a favorite afterwards.
    pub fn toggle_favorite(&mut self, city: &str) -> bool {
        if self.remove_favorite(city) {
            false
        } else {
            self.favorites.push(city.trim().to_string());
            true
        }
    }

    /// Returns `false` when nothing was added because the city is already there.
    pub fn add_favorite(&mut self, city: &str) -> bool {
        if self.is_favorite(city) {
            return false;
        }
        self.favorites.push(city.trim().to_string());
        true
    }

    /// Returns whether `city` was present.
    pub fn remove_favorite(&mut self, city: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| !same_city(f, city));
        self.favorites.len() != before
    }
}

fn same_city(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
