use crate::{
    Config, CurrentConditions, ForecastResult, Location, error::WeatherError,
    provider::openweather::OpenWeatherProvider, units::UnitSystem,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// A source of current conditions and multi-day forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<CurrentConditions, WeatherError>;

    async fn forecast(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<ForecastResult, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `skydeck configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider =
        OpenWeatherProvider::with_base_url(api_key, &config.base_url, config.retry.into())?;

    Ok(Arc::new(provider))
}
