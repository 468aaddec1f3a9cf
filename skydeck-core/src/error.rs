//! Error taxonomy shared by the fetcher, the normalizer and the session layer.

use thiserror::Error;

/// Failure of a single HTTP + JSON exchange. Every variant is retried by
/// [`crate::fetch::fetch_json_with_retry`] until the budget runs out.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-success HTTP status. `message` comes from the provider's error body
    /// when it has one.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Network(e) => e.status().map(|s| s.as_u16()),
            FetchError::Decode(_) => None,
        }
    }
}

/// The payload handed to a processing step has the wrong shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("forecast data is missing")]
    Missing,

    #[error("forecast data is not a list")]
    NotASequence,

    #[error("forecast data is empty")]
    Empty,

    #[error("sample {index} is malformed: {reason}")]
    MalformedSample { index: usize, reason: String },

    #[error("current conditions payload is malformed: {0}")]
    MalformedCurrent(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    /// The HTTP exchange succeeded but the payload's own `cod` field reports
    /// a failure.
    #[error("provider error {code}: {message}")]
    Provider { code: String, message: String },
}

impl WeatherError {
    /// Short text suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> &'static str {
        const NOT_FOUND: &str = "Location not found. Please try another city.";
        const BAD_KEY: &str = "Invalid API key. Please check your configuration.";
        const NETWORK: &str = "Network error. Please check your internet connection.";
        const GENERIC: &str = "An error occurred while fetching weather data.";

        match self {
            WeatherError::Fetch(FetchError::Network(e)) if e.status().is_none() => NETWORK,
            WeatherError::Fetch(e) => match e.status() {
                Some(404) => NOT_FOUND,
                Some(401) => BAD_KEY,
                _ => GENERIC,
            },
            WeatherError::Provider { code, .. } => match code.as_str() {
                "404" => NOT_FOUND,
                "401" => BAD_KEY,
                _ => GENERIC,
            },
            WeatherError::Geolocation(_) => {
                "Unable to retrieve your location. Please search for a city instead."
            }
            WeatherError::InvalidInput(_) => "Invalid weather data received. Please try again.",
        }
    }
}
