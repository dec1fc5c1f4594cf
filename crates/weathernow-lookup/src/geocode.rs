//! Forward geocoding: turn free text into candidate places.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::sync::Arc;

use serde::Deserialize;
use url::Url;
use weathernow_core::NetworkError;

use crate::error::LookupError;
use crate::http::HttpClient;
use crate::types::Place;

/// Queries shorter than this (in characters) never hit the network.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: Option<String>,
    country: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl SearchResult {
    fn into_place(self) -> Option<Place> {
        Some(Place {
            name: self.name?,
            country: self.country.unwrap_or_default(),
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

/// True when `query` is long enough to be worth a lookup.
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

/// Name search against the geocoding backend
#[derive(Clone)]
pub struct LocationResolver {
    http: Arc<dyn HttpClient>,
    search_url: Url,
}

impl LocationResolver {
    /// `base_url` is the service root, e.g. `https://geocoding-api.open-meteo.com`.
    pub fn new(http: Arc<dyn HttpClient>, base_url: &str) -> Result<Self, LookupError> {
        let search_url = Url::parse(&format!("{}/v1/search", base_url.trim_end_matches('/')))?;
        Ok(Self { http, search_url })
    }

    /// Autocomplete candidates for `query`, in backend order.
    ///
    /// Short queries return an empty list without a request. Entries missing
    /// a name or coordinates are skipped.
    pub async fn suggest(&self, query: &str) -> Result<Vec<Place>, LookupError> {
        if !is_searchable(query) {
            return Ok(Vec::new());
        }

        let body = self.search(query, None).await?;
        let response = parse_response(body).map_err(|e| {
            NetworkError::InvalidResponse(format!("unexpected geocoding response: {}", e))
        })?;
        let places: Vec<Place> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .filter_map(|result| {
                let place = result.into_place();
                if place.is_none() {
                    tracing::debug!("Skipping incomplete geocoding result for {:?}", query);
                }
                place
            })
            .collect();

        tracing::debug!("{} suggestions for {:?}", places.len(), query);
        Ok(places)
    }

    /// The backend's single best match for `query`.
    pub async fn resolve_exact(&self, query: &str) -> Result<Place, LookupError> {
        let body = self.search(query, Some(1)).await?;
        // Well-formed JSON of the wrong shape counts as no match
        let response = parse_response(body).map_err(|e| {
            tracing::debug!("Unexpected geocoding response for {:?}: {}", query, e);
            LookupError::NotFound(query.to_string())
        })?;

        let place = response
            .results
            .and_then(|results| results.into_iter().next())
            .and_then(SearchResult::into_place)
            .ok_or_else(|| LookupError::NotFound(query.to_string()))?;

        tracing::info!(
            "Resolved {:?} to {} ({:.4}, {:.4})",
            query,
            place.display_name(),
            place.latitude,
            place.longitude
        );
        Ok(place)
    }

    async fn search(
        &self,
        query: &str,
        count: Option<u32>,
    ) -> Result<serde_json::Value, LookupError> {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("name", query);
            if let Some(count) = count {
                pairs.append_pair("count", &count.to_string());
            }
        }

        Ok(self.http.get_json(url).await?)
    }
}

fn parse_response(body: serde_json::Value) -> Result<SearchResponse, serde_json::Error> {
    serde_json::from_value(body)
}
