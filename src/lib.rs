//! `AvgWeather` - multi-source weather forecast aggregation
//!
//! This library fetches multi-day forecasts from several independent
//! weather providers and reconciles them into one day-aligned summary
//! with per-day mean lows and highs.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod reconcile;
pub mod web;

// Re-export core types for public API
pub use config::AvgWeatherConfig;
pub use error::AvgWeatherError;
pub use models::{
    AggregateDay, Citation, CurrentConditions, DayKey, DayMap, FlatPeriodRecord, PerDayRecord,
    Provider, Reconciliation,
};
pub use providers::{ForecastSource, GeoNamesClient, YahooSource, YrNoSource};
pub use reconcile::reconcile;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AvgWeatherError>;
