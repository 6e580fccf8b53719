//! Yahoo Weather provider
//!
//! Queries the public YQL weather endpoint. Forecast entries arrive keyed
//! by `%d %b %Y` dates with Fahrenheit temperatures as strings; they are
//! re-keyed to ISO dates on the way in.

use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;

use super::ForecastSource;
use crate::Result;
use crate::error::AvgWeatherError;
use crate::models::{Citation, CurrentConditions, PerDayRecord, Provider};

const YAHOO_URL: &str = "http://query.yahooapis.com/v1/public/yql?\
    q=select%20item%20from%20weather.forecast%20where%20\
    location=%22{zip_code}%22&format=json";

#[derive(Debug, Deserialize)]
pub struct YqlResponse {
    query: YqlQuery,
}

#[derive(Debug, Deserialize)]
struct YqlQuery {
    results: YqlResults,
}

#[derive(Debug, Deserialize)]
struct YqlResults {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    item: ChannelItem,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    condition: Condition,
    forecast: Vec<ForecastEntry>,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    temp: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    date: String,
    day: String,
    low: String,
    high: String,
    text: String,
}

/// Convert the YQL response into a [`Provider`].
///
/// Kept separate from the fetch so the mapping is testable on fixture
/// documents.
pub fn provider_from_response(response: YqlResponse) -> Result<Provider> {
    let item = response.query.results.channel.item;

    let current = CurrentConditions {
        temperature: parse_temperature(&item.condition.temp)?,
        condition: item.condition.text,
    };

    let mut days = IndexMap::new();
    for entry in item.forecast {
        let date = NaiveDate::parse_from_str(&entry.date, "%d %b %Y").map_err(|_| {
            AvgWeatherError::parse(format!("unrecognized forecast date: {}", entry.date))
        })?;
        days.insert(
            date.format("%Y-%m-%d").to_string(),
            PerDayRecord {
                weekday: entry.day,
                low: parse_temperature(&entry.low)?,
                high: parse_temperature(&entry.high)?,
                condition: entry.text,
                icon: None,
            },
        );
    }

    // the mobile link embeds the citation URL after the final '*'
    let cite = match item.link.as_deref().and_then(|l| l.rsplit('*').next()) {
        Some(url) => Citation {
            text: "Yahoo Weather".to_string(),
            url: url.to_string(),
        },
        None => Citation {
            text: "yahoo".to_string(),
            url: "http://www.yahoo.com".to_string(),
        },
    };

    Ok(Provider {
        name: "yahoo".to_string(),
        days,
        current: Some(current),
        cite: Some(cite),
    })
}

fn parse_temperature(raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| AvgWeatherError::parse(format!("invalid temperature value: {raw}")))
}

/// Forecast source backed by Yahoo Weather
pub struct YahooSource {
    client: ClientWithMiddleware,
}

impl YahooSource {
    #[must_use]
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ForecastSource for YahooSource {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch(&self, zip_code: u32) -> Result<Provider> {
        let url = YAHOO_URL.replace("{zip_code}", &zip_code.to_string());
        let response: YqlResponse = super::get_json(&self.client, &url).await?;
        provider_from_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "query": {
            "count": 1,
            "results": {
                "channel": {
                    "item": {
                        "title": "Conditions for Beverly Hills, CA",
                        "link": "http://us.rd.yahoo.com/dailynews/rss/weather/*http://weather.yahoo.com/forecast/USCA0090_f.html",
                        "condition": {"temp": "72", "text": "Partly Cloudy"},
                        "forecast": [
                            {"date": "14 Jul 2012", "day": "Sat", "low": "60", "high": "80", "text": "Sunny"},
                            {"date": "15 Jul 2012", "day": "Sun", "low": "62", "high": "83", "text": "Sunny"},
                            {"date": "16 Jul 2012", "day": "Mon", "low": "63", "high": "81", "text": "Partly Cloudy"}
                        ]
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_provider_from_response() {
        let response: YqlResponse = serde_json::from_str(FIXTURE).unwrap();
        let provider = provider_from_response(response).unwrap();

        assert_eq!(provider.name, "yahoo");
        let keys: Vec<&String> = provider.days.keys().collect();
        assert_eq!(keys, ["2012-07-14", "2012-07-15", "2012-07-16"]);

        let saturday = &provider.days["2012-07-14"];
        assert_eq!(saturday.weekday, "Sat");
        assert_eq!(saturday.low, 60.0);
        assert_eq!(saturday.high, 80.0);
        assert_eq!(saturday.condition, "Sunny");
        assert!(saturday.icon.is_none());

        let current = provider.current.unwrap();
        assert_eq!(current.temperature, 72.0);
        assert_eq!(current.condition, "Partly Cloudy");
    }

    #[test]
    fn test_citation_extracted_from_link() {
        let response: YqlResponse = serde_json::from_str(FIXTURE).unwrap();
        let provider = provider_from_response(response).unwrap();

        let cite = provider.cite.unwrap();
        assert_eq!(cite.text, "Yahoo Weather");
        assert_eq!(cite.url, "http://weather.yahoo.com/forecast/USCA0090_f.html");
    }

    #[test]
    fn test_missing_link_falls_back_to_static_citation() {
        let mut value: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        value["query"]["results"]["channel"]["item"]
            .as_object_mut()
            .unwrap()
            .remove("link");
        let response: YqlResponse = serde_json::from_value(value).unwrap();

        let cite = provider_from_response(response).unwrap().cite.unwrap();
        assert_eq!(cite.text, "yahoo");
        assert_eq!(cite.url, "http://www.yahoo.com");
    }

    #[test]
    fn test_bad_temperature_is_a_parse_error() {
        let mut value: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        value["query"]["results"]["channel"]["item"]["condition"]["temp"] = "n/a".into();
        let response: YqlResponse = serde_json::from_value(value).unwrap();

        assert!(matches!(
            provider_from_response(response),
            Err(AvgWeatherError::Parse { .. })
        ));
    }
}
