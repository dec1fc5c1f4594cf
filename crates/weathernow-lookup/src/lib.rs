//! City lookup and current weather for WeatherNow
//!
//! Resolves free-text city names via the Open-Meteo geocoding API, fetches
//! current conditions from the Open-Meteo forecast API and classifies WMO
//! weather codes into display categories.

pub mod classify;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod http;
pub mod types;

pub use classify::classify;
pub use error::LookupError;
pub use forecast::ForecastClient;
pub use geocode::{is_searchable, LocationResolver, MIN_QUERY_CHARS};
pub use http::{HttpClient, ReqwestClient};
pub use types::*;
