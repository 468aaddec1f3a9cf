use serde::{Deserialize, Serialize};

/// Visual mood picked from the provider's icon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherTheme {
    #[default]
    Clear,
    Night,
    Cloudy,
    Rainy,
    Thunderstorm,
    Snow,
}

impl WeatherTheme {
    /// Icon codes look like `01d` / `10n`: two digits for the condition and a
    /// day/night suffix. Only clear skies distinguish night.
    pub fn from_icon_code(icon: &str) -> Self {
        if icon.contains("01d") {
            return Self::Clear;
        }
        if icon.contains("01n") {
            return Self::Night;
        }

        match icon.get(..2) {
            Some("02" | "03" | "04") => Self::Cloudy,
            Some("09" | "10") => Self::Rainy,
            Some("11") => Self::Thunderstorm,
            Some("13") => Self::Snow,
            _ => Self::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Night => "night",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::Night => "☾",
            Self::Cloudy => "☁",
            Self::Rainy => "☂",
            Self::Thunderstorm => "⚡",
            Self::Snow => "❄",
        }
    }
}

pub fn icon_url(icon_code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon_code}@2x.png")
}
