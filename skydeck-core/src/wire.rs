//! OpenWeather JSON payload shapes.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::WeatherError,
    model::{Condition, RawPeriodSample, SampleTemperature},
};

/// The current-weather endpoint reports `"cod": 200` while the forecast
/// endpoint reports `"cod": "200"`. Both mean success.
pub fn is_success_code(cod: &Value) -> bool {
    match cod {
        Value::Number(n) => n.as_u64() == Some(200),
        Value::String(s) => s.trim() == "200",
        _ => false,
    }
}

/// Check the payload-level status code of a decoded response.
pub fn check_payload_status(payload: &Value) -> Result<(), WeatherError> {
    let cod = payload.get("cod").unwrap_or(&Value::Null);
    if is_success_code(cod) {
        return Ok(());
    }

    let code = match cod {
        Value::String(s) => s.clone(),
        Value::Null => "missing".to_string(),
        other => other.to_string(),
    };
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Invalid response from weather provider")
        .to_string();

    Err(WeatherError::Provider { code, message })
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWeather {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwSampleMain {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwForecastEntry {
    pub dt: i64,
    pub main: OwSampleMain,
    pub weather: Vec<OwWeather>,
}

impl TryFrom<OwForecastEntry> for RawPeriodSample {
    type Error = String;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        let weather = entry
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| "no weather condition".to_string())?;

        Ok(RawPeriodSample {
            timestamp_seconds: entry.dt,
            temperature: SampleTemperature {
                current: entry.main.temp,
                min: entry.main.temp_min,
                max: entry.main.temp_max,
            },
            condition: Condition { description: weather.description, icon_code: weather.icon },
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct OwClouds {
    #[serde(default)]
    pub all: u8,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct OwRain {
    #[serde(rename = "1h", default)]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwSys {
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCurrentResponse {
    pub name: String,
    pub dt: i64,
    #[serde(default)]
    pub timezone: i32,
    pub main: OwCurrentMain,
    pub weather: Vec<OwWeather>,
    pub wind: OwWind,
    #[serde(default)]
    pub clouds: OwClouds,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub rain: Option<OwRain>,
    pub sys: OwSys,
}
