//! Request parameters and their serialization into a One Call query URL.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use url::form_urlencoded;

use crate::{
    error::{OneCallError, Result},
    section::Sections,
};

/// Base URL of the One Call 3.0 endpoint.
pub const ONECALL_ENDPOINT: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Unit system the provider should report values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin, m/s.
    Standard,
    /// Celsius, m/s.
    Metric,
    /// Fahrenheit, mph.
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Standard, Units::Metric, Units::Imperial]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown units '{0}'. Supported units: standard, metric, imperial.")]
pub struct UnknownUnits(pub String);

impl FromStr for Units {
    type Err = UnknownUnits;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(UnknownUnits(value.to_string())),
        }
    }
}

/// Validated, immutable parameters for one One Call request.
#[derive(Clone, PartialEq)]
pub struct RequestConfig {
    latitude: f64,
    longitude: f64,
    sections: Sections,
    units: Option<Units>,
    language: Option<String>,
    api_key: String,
}

impl RequestConfig {
    /// Validate and assemble request parameters.
    ///
    /// Latitude must lie in [-90, 90], longitude in [-180, 180] and the API key
    /// must not be blank. A blank `language` is treated as absent.
    pub fn build(
        latitude: f64,
        longitude: f64,
        sections: Sections,
        units: Option<Units>,
        language: Option<&str>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(OneCallError::Configuration(format!(
                "latitude {latitude} is outside -90..=90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(OneCallError::Configuration(format!(
                "longitude {longitude} is outside -180..=180"
            )));
        }

        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OneCallError::Configuration("API key is empty".to_string()));
        }

        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned);

        Ok(Self {
            latitude,
            longitude,
            sections,
            units,
            language,
            api_key,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn sections(&self) -> Sections {
        self.sections
    }

    pub fn units(&self) -> Option<Units> {
        self.units
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Full query URL against the public endpoint.
    pub fn to_url(&self) -> String {
        self.url_for(ONECALL_ENDPOINT)
    }

    /// Query URL against `endpoint`. Parameter order is always
    /// lat, lon, exclude, units, lang, appid.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}&appid={}", self.url_without_key(endpoint), encode(&self.api_key))
    }

    /// Same as `url_for` with the key masked, for logs.
    pub(crate) fn redacted_url_for(&self, endpoint: &str) -> String {
        format!("{}&appid=***", self.url_without_key(endpoint))
    }

    fn url_without_key(&self, endpoint: &str) -> String {
        let mut url = format!(
            "{endpoint}?lat={:.2}&lon={:.2}",
            self.latitude, self.longitude
        );

        let exclude = self.sections.exclude_param();
        if !exclude.is_empty() {
            url.push_str("&exclude=");
            url.push_str(&exclude);
        }
        if let Some(units) = self.units {
            url.push_str("&units=");
            url.push_str(units.as_str());
        }
        if let Some(lang) = &self.language {
            url.push_str("&lang=");
            url.push_str(&encode(lang));
        }

        url
    }
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("sections", &self.sections)
            .field("units", &self.units)
            .field("language", &self.language)
            .field("api_key", &"***")
            .finish()
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
