//! yr.no forecast provider
//!
//! yr.no returns a nested XML document rather than per-day records, and it
//! samples several time windows per day. The document is parsed into a
//! generic tree, normalized, walked into flat period records, filtered to
//! future periods, converted to Fahrenheit, and collapsed to one record
//! per day (min/max for temperatures, most frequent value for the
//! condition).

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, warn};

use super::ForecastSource;
use super::geonames::GeoNamesClient;
use crate::Result;
use crate::error::AvgWeatherError;
use crate::models::{Citation, FlatPeriodRecord, PerDayRecord, Provider};
use crate::reconcile::frequency::resolve_most_frequent;
use crate::reconcile::tree::{NormalizedNode, RawTreeNode, normalize};

const FORECAST_URL: &str =
    "http://www.yr.no/place/{country}/{admin_name}/{place_name}/forecast.xml";

/// Convert Celsius to Fahrenheit
#[must_use]
pub fn c_to_f(celsius: i32) -> f64 {
    9.0 / 5.0 * f64::from(celsius) + 32.0
}

/// Day key for a period spanning `from_date..=to_date`.
///
/// Computed as `from + (to - from)`, which doubles the span from the start
/// and lands on `to_date` for multi-day periods. Not the true midpoint;
/// kept for output compatibility with the historical behavior.
#[must_use]
pub fn average_date(from_date: NaiveDate, to_date: NaiveDate) -> NaiveDate {
    from_date + (to_date - from_date)
}

/// Whether either end of the period falls on or before `today`
#[must_use]
pub fn is_today_or_earlier(from_date: NaiveDate, to_date: NaiveDate, today: NaiveDate) -> bool {
    from_date <= today || to_date <= today
}

fn date_to_weekday(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

fn parse_period_date(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| AvgWeatherError::parse(format!("unrecognized period date: {raw}")))
}

fn period_from_node(node: &NormalizedNode) -> Result<FlatPeriodRecord> {
    let from_date = parse_period_date(
        node.attr("from")
            .ok_or_else(|| AvgWeatherError::parse("period without a 'from' attribute"))?,
    )?;
    let to_date = parse_period_date(
        node.attr("to")
            .ok_or_else(|| AvgWeatherError::parse("period without a 'to' attribute"))?,
    )?;
    if to_date < from_date {
        return Err(AvgWeatherError::parse(format!(
            "period ends before it starts: {from_date} > {to_date}"
        )));
    }

    let condition = node
        .find("symbol")
        .and_then(|symbol| symbol.attr("name"))
        .ok_or_else(|| AvgWeatherError::parse("period without a symbol name"))?
        .to_string();

    let temperature = node
        .find("temperature")
        .and_then(|t| t.attr("value"))
        .ok_or_else(|| AvgWeatherError::parse("period without a temperature value"))?;
    let temperature_celsius = temperature
        .parse()
        .map_err(|_| AvgWeatherError::parse(format!("invalid temperature value: {temperature}")))?;

    Ok(FlatPeriodRecord {
        from_date,
        to_date,
        condition,
        temperature_celsius,
    })
}

/// Extract the flat period records from a normalized forecast document.
///
/// Periods that fail to parse are logged and skipped, the same way other
/// sources tolerate individually malformed entries; a document yielding no
/// periods at all is an error.
pub fn periods_from_document(document: &NormalizedNode) -> Result<Vec<FlatPeriodRecord>> {
    let tabular = document
        .descend(&["forecast", "tabular"])
        .ok_or_else(|| AvgWeatherError::parse("document has no forecast/tabular section"))?;

    let mut periods = Vec::new();
    let mut parse_errors = 0;
    for node in tabular.children_named("time") {
        match period_from_node(node) {
            Ok(period) => periods.push(period),
            Err(e) => {
                warn!("Skipping malformed forecast period: {e}");
                parse_errors += 1;
            }
        }
    }
    debug!(
        "Extracted {} forecast periods ({} parse errors)",
        periods.len(),
        parse_errors
    );

    if periods.is_empty() {
        return Err(AvgWeatherError::parse(
            "no valid forecast periods in document",
        ));
    }
    Ok(periods)
}

fn citation_from_document(document: &NormalizedNode) -> Option<Citation> {
    // return citation text and url, per yr.no terms
    let link = document.descend(&["credit", "link"])?;
    Some(Citation {
        text: link.attr("text")?.to_string(),
        url: link.attr("url")?.to_string(),
    })
}

/// Collapse flat periods into a [`Provider`], dropping periods at or
/// before `today`.
///
/// Each remaining period is keyed by its [`average_date`]; a day sampled
/// several times gets the truncated min/max of its converted temperatures
/// and the most frequent of its condition labels.
pub fn provider_from_document(document: &NormalizedNode, today: NaiveDate) -> Result<Provider> {
    let mut temperatures: IndexMap<String, Vec<f64>> = IndexMap::new();
    let mut conditions: IndexMap<String, Vec<String>> = IndexMap::new();

    for period in periods_from_document(document)? {
        if is_today_or_earlier(period.from_date, period.to_date, today) {
            continue;
        }
        let day_key = average_date(period.from_date, period.to_date)
            .format("%Y-%m-%d")
            .to_string();
        temperatures
            .entry(day_key.clone())
            .or_default()
            .push(c_to_f(period.temperature_celsius));
        conditions.entry(day_key).or_default().push(period.condition);
    }

    let conditions = resolve_most_frequent(conditions)?;

    let mut days = IndexMap::new();
    for (day_key, condition) in conditions {
        let Some(samples) = temperatures.get(&day_key) else {
            continue;
        };
        let low = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let high = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let date = NaiveDate::parse_from_str(&day_key, "%Y-%m-%d")
            .map_err(|_| AvgWeatherError::parse(format!("unrecognized day key: {day_key}")))?;

        days.insert(
            day_key,
            PerDayRecord {
                weekday: date_to_weekday(date),
                low: low.trunc(),
                high: high.trunc(),
                condition,
                icon: None,
            },
        );
    }

    Ok(Provider {
        name: "yr.no".to_string(),
        days,
        current: None,
        cite: citation_from_document(document),
    })
}

/// Forecast source backed by yr.no
pub struct YrNoSource {
    client: ClientWithMiddleware,
    geonames: GeoNamesClient,
}

impl YrNoSource {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, geonames: GeoNamesClient) -> Self {
        Self { client, geonames }
    }
}

#[async_trait]
impl ForecastSource for YrNoSource {
    fn name(&self) -> &'static str {
        "yr.no"
    }

    /// Current conditions are not available from yr.no, so none are
    /// recorded.
    async fn fetch(&self, zip_code: u32) -> Result<Provider> {
        let place = self.geonames.resolve_place(zip_code).await?;
        let url = FORECAST_URL
            .replace("{country}", &urlencoding::encode(&place.country_name))
            .replace("{admin_name}", &urlencoding::encode(&place.admin_name))
            .replace("{place_name}", &urlencoding::encode(&place.place_name));

        let xml = super::get_text(&self.client, &url).await?;
        let document = normalize(RawTreeNode::from_xml(&xml)?);
        provider_from_document(&document, Utc::now().date_naive())
    }
}
