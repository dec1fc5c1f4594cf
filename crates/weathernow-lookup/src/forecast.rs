use std::sync::Arc;

use serde::Deserialize;
use url::Url;
use weathernow_core::NetworkError;

use crate::error::LookupError;
use crate::http::HttpClient;
use crate::types::{CurrentConditions, Place};

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentConditions>,
}

/// Current-conditions client for the forecast backend
#[derive(Clone)]
pub struct ForecastClient {
    http: Arc<dyn HttpClient>,
    forecast_url: Url,
}

impl ForecastClient {
    /// `base_url` is the service root, e.g. `https://api.open-meteo.com`.
    pub fn new(http: Arc<dyn HttpClient>, base_url: &str) -> Result<Self, LookupError> {
        let forecast_url =
            Url::parse(&format!("{}/v1/forecast", base_url.trim_end_matches('/')))?;
        Ok(Self { http, forecast_url })
    }

    /// Fetch the current conditions at `place`.
    ///
    /// A response without `current_weather` is an invalid response, not an
    /// empty result.
    pub async fn fetch_current(&self, place: &Place) -> Result<CurrentConditions, LookupError> {
        let mut url = self.forecast_url.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &place.latitude.to_string())
            .append_pair("longitude", &place.longitude.to_string())
            .append_pair("current_weather", "true");

        let body = self.http.get_json(url).await?;
        let response: ForecastResponse = serde_json::from_value(body).map_err(|e| {
            NetworkError::InvalidResponse(format!("unexpected forecast response: {}", e))
        })?;

        let current = response.current_weather.ok_or_else(|| {
            NetworkError::InvalidResponse("forecast response has no current_weather".to_string())
        })?;

        tracing::info!(
            "Current weather for {}: {}°C, code {}",
            place.display_name(),
            current.temperature,
            current.weathercode
        );
        Ok(current)
    }
}
