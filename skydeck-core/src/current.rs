use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::InvalidInputError,
    forecast::round_temperature,
    model::{CurrentConditions, CurrentTemperature},
    time::{local_time, offset_from_seconds},
    units::{UnitSystem, wind_speed_to_mps},
    wire::OwCurrentResponse,
};

/// Turn a current-weather payload into [`CurrentConditions`]. Temperatures
/// are rounded; wind speed is normalized to m/s; times are local to the city.
pub fn process_current(
    payload: &Value,
    requested: UnitSystem,
) -> Result<CurrentConditions, InvalidInputError> {
    let malformed = InvalidInputError::MalformedCurrent;

    let parsed = OwCurrentResponse::deserialize(payload).map_err(|e| malformed(e.to_string()))?;
    let weather = parsed
        .weather
        .first()
        .ok_or_else(|| malformed("no weather condition".to_string()))?;

    let offset = offset_from_seconds(parsed.timezone);
    let at = |ts: i64| {
        local_time(ts, offset).ok_or_else(|| malformed(format!("timestamp {ts} is out of range")))
    };

    Ok(CurrentConditions {
        city: parsed.name.clone(),
        country: parsed.sys.country.clone(),
        condition_description: weather.description.clone(),
        icon_code: weather.icon.clone(),
        observed_at: at(parsed.dt)?,
        temperature: CurrentTemperature {
            current: round_temperature(parsed.main.temp),
            feels_like: round_temperature(parsed.main.feels_like),
            min: round_temperature(parsed.main.temp_min),
            max: round_temperature(parsed.main.temp_max),
        },
        humidity_pct: parsed.main.humidity,
        pressure_hpa: parsed.main.pressure,
        wind_speed_mps: wind_speed_to_mps(parsed.wind.speed, requested),
        wind_direction_deg: parsed.wind.deg,
        cloudiness_pct: parsed.clouds.all,
        visibility_km: parsed.visibility.map(|m| m / 1000.0),
        precipitation_mm: parsed
            .rain
            .and_then(|r| r.one_hour)
            .map(|mm| mm.round() as i64)
            .unwrap_or(0),
        sunrise: at(parsed.sys.sunrise)?,
        sunset: at(parsed.sys.sunset)?,
    })
}
