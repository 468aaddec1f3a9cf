//! One fetch cycle = current conditions + forecast for one location, fetched
//! concurrently. Cycles are numbered so that a slow, older cycle can never
//! overwrite the result of a newer one.

use chrono::Utc;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tracing::info;

use crate::{
    error::WeatherError,
    geo::Geolocator,
    model::{Location, WeatherReport},
    provider::WeatherProvider,
    units::UnitSystem,
};

/// Hands out strictly increasing cycle numbers, starting at 1.
#[derive(Debug, Default)]
pub struct CycleCounter(AtomicU64);

impl CycleCounter {
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchCycle {
    pub sequence: u64,
    pub report: WeatherReport,
}

#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    cycles: Arc<CycleCounter>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider, cycles: Arc::new(CycleCounter::default()) }
    }

    /// Fetch and process both payloads. Either both succeed or the cycle fails
    /// as a whole.
    pub async fn load(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<FetchCycle, WeatherError> {
        let sequence = self.cycles.begin();

        let (current, forecast) = tokio::try_join!(
            self.provider.current(location, units),
            self.provider.forecast(location, units),
        )?;

        info!(
            sequence,
            %location,
            city = %current.city,
            days = forecast.daily.len(),
            "weather loaded"
        );

        Ok(FetchCycle {
            sequence,
            report: WeatherReport { current, forecast, units, fetched_at: Utc::now() },
        })
    }

    /// Resolve the device position first, then load as for coordinates.
    pub async fn load_here(
        &self,
        geolocator: &dyn Geolocator,
        units: UnitSystem,
    ) -> Result<FetchCycle, WeatherError> {
        let coords = geolocator.locate().await?;
        self.load(&Location::Coordinates(coords), units).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    /// A newer cycle is already on screen; the state was left untouched.
    Superseded,
}

/// Everything the view needs, owned by the caller and replaced wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub units: UnitSystem,
    pub current_city: Option<String>,
    pub report: Option<WeatherReport>,
    pub shown_sequence: u64,
}

impl AppState {
    pub fn new(units: UnitSystem) -> Self {
        Self { units, ..Self::default() }
    }

    pub fn apply(self, cycle: FetchCycle) -> (Self, Applied) {
        if cycle.sequence <= self.shown_sequence {
            info!(
                sequence = cycle.sequence,
                shown = self.shown_sequence,
                "discarding superseded fetch cycle"
            );
            return (self, Applied::Superseded);
        }

        let state = AppState {
            units: cycle.report.units,
            current_city: Some(cycle.report.current.city.clone()),
            report: Some(cycle.report),
            shown_sequence: cycle.sequence,
        };
        (state, Applied::Updated)
    }
}
