use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::GeolocationError, model::Coordinates};

/// Source of the device's position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Position taken from the `[home]` section of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGeolocator {
    home: Option<Coordinates>,
}

impl ConfiguredGeolocator {
    pub fn new(home: Option<Coordinates>) -> Self {
        Self { home }
    }
}

#[async_trait]
impl Geolocator for ConfiguredGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let home = self.home.ok_or_else(|| {
            GeolocationError::Unavailable(
                "no home coordinates configured; add a [home] section to the config file"
                    .to_string(),
            )
        })?;

        let valid = (-90.0..=90.0).contains(&home.latitude)
            && (-180.0..=180.0).contains(&home.longitude);
        if !valid {
            return Err(GeolocationError::Unavailable(format!(
                "configured coordinates {},{} are out of range",
                home.latitude, home.longitude
            )));
        }

        Ok(home)
    }
}
