use thiserror::Error;
use weathernow_core::{NetworkError, WeatherError};

/// Lookup errors (geocoding and forecast)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// The geocoder had no usable match for the query
    #[error("No match for {0:?}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<LookupError> for WeatherError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::NotFound(query) => WeatherError::NotFound(query),
            LookupError::Network(net) => WeatherError::Transport(net),
            LookupError::InvalidUrl(url) => {
                WeatherError::Transport(NetworkError::ConnectionFailed(url.to_string()))
            }
        }
    }
}
