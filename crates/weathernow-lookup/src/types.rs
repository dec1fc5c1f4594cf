use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    FreezingRain,
    Snow,
    Thunderstorm,
    ThunderstormHail,
    Unknown,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 56 | 57 => Self::Drizzle,
            61 | 63 | 65 | 80 | 81 | 82 => Self::Rain,
            66 | 67 => Self::FreezingRain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 => Self::Thunderstorm,
            96 | 99 => Self::ThunderstormHail,
            // Undocumented codes must still render
            _ => Self::Unknown,
        }
    }

    /// Canonical lowercase description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "clear sky",
            Self::PartlyCloudy => "partly cloudy",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::FreezingRain => "freezing rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
            Self::ThunderstormHail => "thunderstorm + hail",
            Self::Unknown => "unknown",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "🌤️",
            Self::Cloudy => "☁️",
            Self::Fog => "🌫️",
            Self::Drizzle => "🌦️",
            Self::Rain => "🌧️",
            Self::FreezingRain => "🌨️",
            Self::Snow => "❄️",
            Self::Thunderstorm => "⛈️",
            Self::ThunderstormHail => "🌩️",
            Self::Unknown => "🌍",
        }
    }

    /// Display label with icon, e.g. "☁️ Cloudy"
    pub fn label(&self) -> String {
        let text = match self {
            Self::Clear => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormHail => "Thunder + hail",
            Self::Unknown => "Unknown",
        };
        format!("{} {}", self.icon(), text)
    }
}

/// A geocoded place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// Empty when the geocoder has no country for the place
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// "Paris, France", or just the name when no country is known
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Raw current conditions as returned by the forecast API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// °C
    pub temperature: f64,
    /// km/h
    pub windspeed: f64,
    pub weathercode: i32,
    /// ISO-8601 local time, e.g. "2024-05-01T12:00"
    pub time: String,
}

/// Display-ready weather for one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub place: Place,
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i32,
    pub condition: WeatherCondition,
    pub description: String,
    pub observed_at: String,
}
