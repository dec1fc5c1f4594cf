//! HTTP seam for the geocoding and forecast clients.
//!
//! The resolver and forecast client only ever need "GET this URL, give me
//! JSON", so that is the whole trait. Tests swap in canned implementations.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use weathernow_core::{NetworkError, ReqwestErrorExt};

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` and decode the body as JSON.
    ///
    /// Non-2xx statuses and undecodable bodies are errors.
    async fn get_json(&self, url: Url) -> Result<serde_json::Value, NetworkError>;
}

/// `HttpClient` backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(ReqwestErrorExt::into_network_error)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_json(&self, url: Url) -> Result<serde_json::Value, NetworkError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}
