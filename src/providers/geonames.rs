//! GeoNames place lookup
//!
//! The yr.no forecast URL is built from place names, so a zip code is
//! resolved in two calls: postal code to place/region/country code, then
//! country code to country name.

use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::debug;

use crate::Result;
use crate::error::AvgWeatherError;

const POSTAL_CODE_URL: &str =
    "http://ws.geonames.org/postalCodeSearchJSON?formatted=true&postalcode={zip_code}&maxRows=1&style=full";
const COUNTRY_INFO_URL: &str =
    "http://ws.geonames.org/countryInfoJSON?formatted=true&lang=en&country={country_code}&style=full";

#[derive(Debug, Deserialize)]
struct PostalCodeSearchResponse {
    #[serde(rename = "postalCodes", default)]
    postal_codes: Vec<PostalCodeEntry>,
}

#[derive(Debug, Deserialize)]
struct PostalCodeEntry {
    #[serde(rename = "placeName")]
    place_name: String,
    #[serde(rename = "adminName1")]
    admin_name: String,
    #[serde(rename = "countryCode")]
    country_code: String,
}

#[derive(Debug, Deserialize)]
struct CountryInfoResponse {
    #[serde(default)]
    geonames: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    #[serde(rename = "countryName")]
    country_name: String,
}

/// Resolved place information for one postal code
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceInfo {
    pub place_name: String,
    pub admin_name: String,
    pub country_name: String,
}

/// Client for the GeoNames web services
#[derive(Clone)]
pub struct GeoNamesClient {
    client: ClientWithMiddleware,
    username: Option<String>,
}

impl GeoNamesClient {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, username: Option<String>) -> Self {
        Self { client, username }
    }

    /// Resolve a zip code to its place, administrative region, and country.
    pub async fn resolve_place(&self, zip_code: u32) -> Result<PlaceInfo> {
        let url = self.with_username(
            &POSTAL_CODE_URL.replace("{zip_code}", &zip_code.to_string()),
        );
        let response: PostalCodeSearchResponse = super::get_json(&self.client, &url).await?;
        let entry = response.postal_codes.into_iter().next().ok_or_else(|| {
            AvgWeatherError::api(format!("no place found for zip code {zip_code}"))
        })?;
        debug!(
            "Resolved zip {} to {} ({}, {})",
            zip_code, entry.place_name, entry.admin_name, entry.country_code
        );

        let url = self.with_username(
            &COUNTRY_INFO_URL.replace("{country_code}", &entry.country_code),
        );
        let response: CountryInfoResponse = super::get_json(&self.client, &url).await?;
        let country = response.geonames.into_iter().next().ok_or_else(|| {
            AvgWeatherError::api(format!("unknown country code {}", entry.country_code))
        })?;

        Ok(PlaceInfo {
            place_name: entry.place_name,
            admin_name: entry.admin_name,
            country_name: country.country_name,
        })
    }

    fn with_username(&self, url: &str) -> String {
        match &self.username {
            Some(username) => format!("{url}&username={}", urlencoding::encode(username)),
            None => url.to_string(),
        }
    }
}
