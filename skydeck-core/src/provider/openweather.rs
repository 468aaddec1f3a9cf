use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{
    current::process_current,
    error::WeatherError,
    fetch::{RetryPolicy, fetch_json_with_retry},
    forecast::normalize_forecast,
    model::{CurrentConditions, ForecastResult, Location},
    time::offset_from_seconds,
    units::UnitSystem,
    wire::check_payload_status,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: Url,
    retry: RetryPolicy,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, RetryPolicy::default())
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: &str,
        retry: RetryPolicy,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid OpenWeather base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("OpenWeather base URL cannot carry a path: {base_url}"));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { api_key: api_key.into(), base_url, retry, http })
    }

    /// `{base}/{endpoint}?<location>&appid=..&units=..`
    fn endpoint_url(&self, endpoint: &str, location: &Location, units: UnitSystem) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }

        url.query_pairs_mut()
            .extend_pairs(location.query_pairs())
            .append_pair("appid", &self.api_key)
            .append_pair("units", units.as_str());
        url
    }

    async fn fetch_checked(
        &self,
        endpoint: &str,
        location: &Location,
        units: UnitSystem,
    ) -> Result<Value, WeatherError> {
        debug!(endpoint, %location, %units, "requesting OpenWeather");

        let url = self.endpoint_url(endpoint, location, units);
        let payload = fetch_json_with_retry(&self.http, &url, &self.retry).await?;
        check_payload_status(&payload)?;
        Ok(payload)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<CurrentConditions, WeatherError> {
        let payload = self.fetch_checked("weather", location, units).await?;
        Ok(process_current(&payload, units)?)
    }

    async fn forecast(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<ForecastResult, WeatherError> {
        let payload = self.fetch_checked("forecast", location, units).await?;

        let offset = payload
            .pointer("/city/timezone")
            .and_then(Value::as_i64)
            .and_then(|s| i32::try_from(s).ok())
            .map(offset_from_seconds)
            .unwrap_or_else(|| offset_from_seconds(0));

        Ok(normalize_forecast(payload.get("list"), offset)?)
    }
}
