//! Data models for reconciled weather forecasts
//!
//! This module contains the structures shared between the provider adapters,
//! the reconciliation engine, and the API layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier for one forecast day: either an ISO calendar date
/// (`YYYY-MM-DD`) or a weekday abbreviation (`Mon`), never mixed within one
/// provider's output.
pub type DayKey = String;

/// Ordered mapping from [`DayKey`] to [`PerDayRecord`].
///
/// Insertion order (first period inserted appears first) is a displayed
/// contract, so a plain hash map is never used here.
pub type DayMap = IndexMap<DayKey, PerDayRecord>;

/// One provider's reported forecast for a single day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PerDayRecord {
    /// Weekday abbreviation as the provider reported (or derived) it
    pub weekday: String,
    /// Forecast low in degrees Fahrenheit
    pub low: f64,
    /// Forecast high in degrees Fahrenheit
    pub high: f64,
    /// Human-readable condition label
    pub condition: String,
    /// Condition icon URL, when the provider supplies one
    pub icon: Option<String>,
}

/// Current conditions, reported by some providers alongside the forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Current temperature in degrees Fahrenheit
    pub temperature: f64,
    /// Human-readable condition label
    pub condition: String,
}

/// Attribution for a provider's data, shown per the provider's terms
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Citation {
    pub text: String,
    pub url: String,
}

/// One external weather data source and its day-keyed forecast series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Provider {
    /// Source name, e.g. `"yahoo"` or `"yr.no"`
    pub name: String,
    /// Forecast records in the order the provider reported them
    pub days: DayMap,
    /// Current conditions, when the provider reports them
    pub current: Option<CurrentConditions>,
    /// Attribution, when the provider requires one
    pub cite: Option<Citation>,
}

impl Provider {
    /// Create a provider with forecast data only
    #[must_use]
    pub fn new(name: impl Into<String>, days: DayMap) -> Self {
        Self {
            name: name.into(),
            days,
            current: None,
            cite: None,
        }
    }
}

/// Cross-provider reconciled aggregate for one day on the unified axis
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AggregateDay {
    /// Day this aggregate covers
    pub day_key: DayKey,
    /// Weekday label from the first provider to report this day
    pub weekday: String,
    /// Arithmetic mean of the contributing providers' lows
    pub mean_low: f64,
    /// Arithmetic mean of the contributing providers' highs
    pub mean_high: f64,
    /// How many providers reported this day (1..=provider count)
    pub contributing_provider_count: usize,
}

/// Result of reconciling all providers' forecasts
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Reconciliation {
    /// Unified day axis in first-to-report order
    pub axis: Vec<DayKey>,
    /// One aggregate per axis entry
    pub per_day: Vec<AggregateDay>,
    /// Each provider's raw series, passed through unchanged for display
    pub per_provider: Vec<Provider>,
}

/// One forecast time window extracted from a tree-shaped provider document,
/// before day-level collapsing
#[derive(Debug, Clone, PartialEq)]
pub struct FlatPeriodRecord {
    /// First calendar date the window covers
    pub from_date: chrono::NaiveDate,
    /// Last calendar date the window covers (`to_date >= from_date`)
    pub to_date: chrono::NaiveDate,
    /// Condition label for the window
    pub condition: String,
    /// Reported temperature in whole degrees Celsius
    pub temperature_celsius: i32,
}
