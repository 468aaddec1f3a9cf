//! Core library for the `skydeck` weather dashboard.
//!
//! This crate defines:
//! - Retrying JSON fetches against the OpenWeather API
//! - Forecast normalization into hourly and per-day summaries
//! - Configuration, preferences and the fetch-cycle state model
//!
//! It is used by `skydeck-cli`, but carries no terminal rendering itself.

pub mod config;
pub mod current;
pub mod error;
pub mod fetch;
pub mod forecast;
pub mod geo;
pub mod model;
pub mod prefs;
pub mod provider;
pub mod session;
pub mod theme;
pub mod time;
pub mod units;
pub mod wire;

pub use config::Config;
pub use error::{FetchError, GeolocationError, InvalidInputError, WeatherError};
pub use fetch::{RetryPolicy, fetch_json_with_retry};
pub use forecast::{normalize_forecast, normalize_samples};
pub use model::{
    Coordinates, CurrentConditions, DailyBucket, ForecastResult, HourlyEntry, Location,
    RawPeriodSample, WeatherReport,
};
pub use prefs::Preferences;
pub use provider::WeatherProvider;
pub use session::{AppState, Applied, FetchCycle, WeatherService};
pub use units::{UnitSystem, convert_wind_speed};
