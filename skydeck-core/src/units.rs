use serde::{Deserialize, Serialize};
use std::fmt;

const MPS_TO_KMH: f64 = 3.6;
const MPS_TO_MPH: f64 = 2.237;

/// Unit system requested from the provider and used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn wind_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(UnitSystem::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Convert a wind speed in m/s to the display unit: km/h for metric, mph for
/// imperial.
pub fn convert_wind_speed(meters_per_second: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => meters_per_second * MPS_TO_KMH,
        UnitSystem::Imperial => meters_per_second * MPS_TO_MPH,
    }
}

/// Normalize a provider wind speed to m/s. OpenWeather answers in mph when
/// imperial units were requested.
pub fn wind_speed_to_mps(provider_speed: f64, requested: UnitSystem) -> f64 {
    match requested {
        UnitSystem::Metric => provider_speed,
        UnitSystem::Imperial => provider_speed / MPS_TO_MPH,
    }
}
