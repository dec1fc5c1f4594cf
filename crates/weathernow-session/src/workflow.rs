//! The two network workflows behind the session effects.
//!
//! Both turn lookup failures into `WeatherError` at this boundary and log the
//! detail the user never sees.

use weathernow_core::WeatherError;
use weathernow_lookup::{
    classify, ForecastClient, LocationResolver, LookupError, Place, WeatherSummary,
};

use crate::state::Target;

/// Autocomplete candidates for `query`.
pub async fn fetch_suggestions(
    resolver: &LocationResolver,
    query: &str,
) -> Result<Vec<Place>, WeatherError> {
    resolver.suggest(query).await.map_err(WeatherError::from)
}

/// Resolve `target` (unless it is already a place), then fetch and classify
/// its current weather.
pub async fn fetch_weather(
    resolver: &LocationResolver,
    forecast: &ForecastClient,
    target: Target,
) -> Result<WeatherSummary, WeatherError> {
    let place = match target {
        Target::Place(place) => place,
        Target::Query(query) => resolver
            .resolve_exact(&query)
            .await
            .map_err(|e| log_failure("resolve", e))?,
    };

    let conditions = forecast
        .fetch_current(&place)
        .await
        .map_err(|e| log_failure("forecast", e))?;

    Ok(classify(place, conditions))
}

fn log_failure(step: &str, error: LookupError) -> WeatherError {
    match &error {
        LookupError::NotFound(query) => {
            tracing::info!("{} step: no match for {:?}", step, query);
        }
        LookupError::Network(net) if net.is_connectivity() => {
            tracing::warn!("{} step: backend unreachable: {}", step, net);
        }
        other => {
            tracing::error!("{} step failed: {}", step, other);
        }
    }
    error.into()
}
