//! Weather forecast providers
//!
//! Each provider pairs a small HTTP client with an adapter that maps the
//! provider's native document into the common [`Provider`] shape. Fetches
//! share one retrying `reqwest` client; retry and backoff live here, never
//! in the reconciliation core.

pub mod geonames;
pub mod yahoo;
pub mod yrno;

pub use geonames::GeoNamesClient;
pub use yahoo::YahooSource;
pub use yrno::YrNoSource;

use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::RetryTransientMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::Result;
use crate::config::ProvidersConfig;
use crate::error::AvgWeatherError;
use crate::models::Provider;

/// One external weather data source
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Source name used for logging and display
    fn name(&self) -> &'static str;

    /// Fetch and adapt this source's forecast for a zip code
    async fn fetch(&self, zip_code: u32) -> Result<Provider>;
}

/// Build the shared HTTP client with timeout and transient-error retries
pub fn build_http_client(config: &ProvidersConfig) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
        .build()
        .map_err(|e| AvgWeatherError::config(format!("failed to build HTTP client: {e}")))?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &ClientWithMiddleware,
    url: &str,
) -> Result<T> {
    debug!("GET {url}");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AvgWeatherError::api(format!("{url} returned {status}")));
    }
    Ok(response.json().await?)
}

pub(crate) async fn get_text(client: &ClientWithMiddleware, url: &str) -> Result<String> {
    debug!("GET {url}");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AvgWeatherError::api(format!("{url} returned {status}")));
    }
    Ok(response.text().await?)
}
