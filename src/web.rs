use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::{self, AppState};
use crate::config::AvgWeatherConfig;
use crate::providers::{self, ForecastSource, GeoNamesClient, YahooSource, YrNoSource};

pub async fn run(config: AvgWeatherConfig) -> Result<()> {
    let client = providers::build_http_client(&config.providers)?;
    let geonames = GeoNamesClient::new(
        client.clone(),
        config.providers.geonames_username.clone(),
    );

    // fetch order is the reconciliation order
    let sources: Vec<Box<dyn ForecastSource>> = vec![
        Box::new(YahooSource::new(client.clone())),
        Box::new(YrNoSource::new(client, geonames)),
    ];
    let state = Arc::new(AppState { sources });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api::router(state))
        .fallback_service(ServeDir::new("frontend/dist"))
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;
    Ok(())
}
