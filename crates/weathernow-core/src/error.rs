//! Error types shared across the WeatherNow crates.
//!
//! `WeatherError` is what the session surfaces to the user; it carries a fixed
//! user-facing message per kind while the wrapped detail is kept for logs.

use thiserror::Error;

/// Network-related errors (HTTP, connectivity, response decoding).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    /// True when the failure happened before a usable response came back.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, NetworkError::ConnectionFailed(_) | NetworkError::Timeout)
    }
}

/// Errors surfaced by a weather lookup session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error("No city name given")]
    EmptyQuery,

    #[error("City not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(#[from] NetworkError),
}

impl WeatherError {
    /// Returns a user-friendly message suitable for display.
    ///
    /// Transport details never reach the user; they are logged where the
    /// error is caught.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::EmptyQuery => "Please enter a city name.",
            WeatherError::NotFound(_) => "City not found. Please enter a valid name.",
            WeatherError::Transport(_) => "Something went wrong. Please try again later.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
