use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, Select};
use skydeck_core::{
    AppState, Config, Location, Preferences, UnitSystem, WeatherService,
    provider::provider_from_config,
};
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skydeck", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default unit system.
    Configure,

    /// Show current conditions, the hourly strip and the 5-day forecast.
    Show {
        /// City name; defaults to the last city shown.
        city: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true, conflicts_with = "city")]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true, conflicts_with = "city")]
        lon: Option<f64>,

        /// Use the [home] coordinates from the config file.
        #[arg(long, conflicts_with_all = ["city", "lat", "lon"])]
        here: bool,

        /// Override the saved unit system for this run.
        #[arg(long, value_parser = parse_units)]
        units: Option<UnitSystem>,

        /// How many hourly entries to print (at most 24).
        #[arg(long, default_value_t = 8)]
        hours: usize,
    },

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Set the unit system, or toggle it when no value is given.
    Units {
        #[arg(value_parser = parse_units)]
        units: Option<UnitSystem>,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List favorite cities.
    List,
    /// Add a city.
    Add { city: String },
    /// Remove a city.
    Remove { city: String },
    /// Add the city if missing, remove it otherwise.
    Toggle { city: String },
    /// Current conditions for every favorite.
    Show,
}

fn parse_units(value: &str) -> Result<UnitSystem, String> {
    UnitSystem::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, lat, lon, here, units, hours } => {
                let location = match (city, lat, lon) {
                    (Some(city), _, _) => Some(Location::City(city)),
                    (None, Some(lat), Some(lon)) => Some(Location::coordinates(lat, lon)),
                    _ => None,
                };
                show(location, here, units, hours).await
            }
            Command::Favorites { action } => favorites(action).await,
            Command::Units { units } => set_units(units),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    // Load without the environment override so it never ends up on disk.
    let mut config = Config::load_from(&path)?;
    let mut prefs = Preferences::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if key.trim().is_empty() {
        bail!("The API key must not be empty.");
    }
    config.set_api_key(key);

    let choices = vec![UnitSystem::Metric, UnitSystem::Imperial];
    let start = choices.iter().position(|u| *u == prefs.units).unwrap_or(0);
    prefs.units = Select::new("Default units:", choices)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read unit system")?;

    config.save()?;
    prefs.save()?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(
    location: Option<Location>,
    here: bool,
    units: Option<UnitSystem>,
    hours: usize,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut prefs = Preferences::load()?;
    let units = units.unwrap_or(prefs.units);

    let service = WeatherService::new(provider_from_config(&config)?);

    let result = if here {
        service.load_here(&config.geolocator(), units).await
    } else {
        let location = location.unwrap_or_else(|| Location::city(prefs.start_city()));
        service.load(&location, units).await
    };

    let cycle = match result {
        Ok(cycle) => cycle,
        Err(err) => {
            error!(error = %err, "failed to load weather");
            bail!(err.user_message());
        }
    };

    let (state, _) = AppState::new(units).apply(cycle);
    if let Some(report) = &state.report {
        let favorite = prefs.is_favorite(&report.current.city);
        print!("{}", render::report(report, hours, favorite));
    }

    if let Some(city) = &state.current_city {
        prefs.remember_city(city);
        prefs.save()?;
    }

    Ok(())
}

async fn favorites(action: FavoritesAction) -> anyhow::Result<()> {
    let mut prefs = Preferences::load()?;

    match action {
        FavoritesAction::List => {
            print!("{}", render::favorites(&prefs.favorites));
        }
        FavoritesAction::Add { city } => {
            if prefs.add_favorite(&city) {
                println!("Added {city} to favorites.");
            } else {
                println!("{city} is already a favorite.");
            }
        }
        FavoritesAction::Remove { city } => {
            if prefs.remove_favorite(&city) {
                println!("Removed {city} from favorites.");
            } else {
                println!("{city} is not a favorite.");
            }
        }
        FavoritesAction::Toggle { city } => {
            if prefs.toggle_favorite(&city) {
                println!("Added {city} to favorites.");
            } else {
                println!("Removed {city} from favorites.");
            }
        }
        FavoritesAction::Show => return show_favorites(&prefs).await,
    }

    prefs.save()
}

/// One line per favorite. Cities are fetched concurrently and printed in the
/// order they were saved.
async fn show_favorites(prefs: &Preferences) -> anyhow::Result<()> {
    if prefs.favorites.is_empty() {
        print!("{}", render::favorites(&prefs.favorites));
        return Ok(());
    }

    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let units = prefs.units;

    let mut tasks = JoinSet::new();
    for (index, city) in prefs.favorites.iter().cloned().enumerate() {
        let provider = provider.clone();
        tasks.spawn(async move {
            let result = provider.current(&Location::city(city.clone()), units).await;
            (index, city, result)
        });
    }

    let mut lines = vec![String::new(); prefs.favorites.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, city, result) = joined.context("Favorite lookup task failed")?;
        lines[index] = match result {
            Ok(current) => render::favorite_line(&current, units),
            Err(err) => {
                debug!(%city, error = %err, "favorite lookup failed");
                format!("{city}: {}", err.user_message())
            }
        };
    }

    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn set_units(units: Option<UnitSystem>) -> anyhow::Result<()> {
    let mut prefs = Preferences::load()?;
    prefs.units = units.unwrap_or_else(|| prefs.units.toggled());
    prefs.save()?;

    println!("Units set to {} ({}).", prefs.units, prefs.units.temperature_symbol());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["skydeck", "show", "--lat", "-33.87", "--lon", "151.2"])
            .unwrap();
        match cli.command {
            Command::Show { lat, lon, city, .. } => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.2));
                assert!(city.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_rejects_half_coordinates() {
        assert!(Cli::try_parse_from(["skydeck", "show", "--lat", "10"]).is_err());
    }

    #[test]
    fn here_conflicts_with_city() {
        assert!(Cli::try_parse_from(["skydeck", "show", "Paris", "--here"]).is_err());
    }

    #[test]
    fn units_value_is_parsed() {
        let cli = Cli::try_parse_from(["skydeck", "units", "imperial"]).unwrap();
        assert!(matches!(cli.command, Command::Units { units: Some(UnitSystem::Imperial) }));

        let cli = Cli::try_parse_from(["skydeck", "units"]).unwrap();
        assert!(matches!(cli.command, Command::Units { units: None }));

        assert!(Cli::try_parse_from(["skydeck", "units", "kelvin"]).is_err());
    }
}
