use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::UnitSystem;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What the caller asks weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates(Coordinates),
}

impl Location {
    pub fn city(name: impl Into<String>) -> Self {
        Location::City(name.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Location::Coordinates(Coordinates { latitude, longitude })
    }

    /// Provider query parameters selecting this location.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Location::City(name) => vec![("q", name.clone())],
            Location::Coordinates(c) => {
                vec![("lat", c.latitude.to_string()), ("lon", c.longitude.to_string())]
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::City(name) => f.write_str(name),
            Location::Coordinates(c) => write!(f, "{:.4},{:.4}", c.latitude, c.longitude),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleTemperature {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub description: String,
    pub icon_code: String,
}

/// One forecast time slice as delivered by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPeriodSample {
    pub timestamp_seconds: i64,
    pub temperature: SampleTemperature,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Wall-clock time at the forecast location.
    pub time: DateTime<FixedOffset>,
    pub temperature: i64,
    pub icon_code: String,
    pub description: String,
}

/// All samples that fall on one calendar day at the forecast location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub items: Vec<HourlyEntry>,
    pub temp_min: i64,
    pub temp_max: i64,
}

impl DailyBucket {
    /// The entry whose icon and description stand for the whole day.
    pub fn representative(&self) -> Option<&HourlyEntry> {
        self.items.first()
    }

    pub fn icon_code(&self) -> &str {
        self.representative().map(|e| e.icon_code.as_str()).unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.representative().map(|e| e.description.as_str()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ForecastResult {
    /// At most five days, in the order they were first seen.
    pub daily: Vec<DailyBucket>,
    /// At most 24 leading samples, independent of day boundaries.
    pub hourly: Vec<HourlyEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTemperature {
    pub current: i64,
    pub feels_like: i64,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: Option<String>,
    pub condition_description: String,
    pub icon_code: String,
    pub observed_at: DateTime<FixedOffset>,
    pub temperature: CurrentTemperature,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    /// Always m/s, whatever unit system was requested.
    pub wind_speed_mps: f64,
    pub wind_direction_deg: Option<f64>,
    pub cloudiness_pct: u8,
    pub visibility_km: Option<f64>,
    pub precipitation_mm: i64,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
}

impl CurrentConditions {
    pub fn utc_offset(&self) -> FixedOffset {
        *self.observed_at.offset()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: ForecastResult,
    pub units: UnitSystem,
    pub fetched_at: DateTime<Utc>,
}
