use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use futures::future;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{AggregateDay, DayKey, Provider};
use crate::providers::ForecastSource;
use crate::reconcile::reconcile;

/// Zip code used when the submitted value is not numeric
const DEFAULT_ZIP_CODE: u32 = 12345;

/// Shared state for the API router
pub struct AppState {
    pub sources: Vec<Box<dyn ForecastSource>>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub zip_code: Option<String>,
}

/// Reconciled weather summary returned to the display layer
#[derive(Debug, Serialize)]
pub struct WeatherSummary {
    pub zip_code: u32,
    pub axis: Vec<DayKey>,
    pub per_day: Vec<AggregateDay>,
    pub providers: Vec<Provider>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .with_state(state)
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherSummary>, StatusCode> {
    let raw = query.zip_code.unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let zip_code = sanitize_zip_code(&raw);
    info!("Fetching forecasts for zip code {zip_code}");

    let fetches = state.sources.iter().map(|source| source.fetch(zip_code));
    let results = future::join_all(fetches).await;

    let providers: Vec<Provider> = results
        .into_iter()
        .zip(&state.sources)
        .filter_map(|(result, source)| match result {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!("Provider {} failed: {e}", source.name());
                None
            }
        })
        .collect();

    let summary = reconcile(providers);
    Ok(Json(WeatherSummary {
        zip_code,
        axis: summary.axis,
        per_day: summary.per_day,
        providers: summary.per_provider,
    }))
}

/// Truncate to five characters and fall back to a default for non-numeric
/// input
fn sanitize_zip_code(raw: &str) -> u32 {
    let truncated: String = raw.trim().chars().take(5).collect();
    truncated.parse().unwrap_or(DEFAULT_ZIP_CODE)
}
