//! Client library for the OpenWeather One Call 3.0 endpoint.
//!
//! This crate defines:
//! - Section selection and the `exclude` query parameter
//! - Request configuration and URL construction
//! - The typed response schema
//! - A single-request client over a pluggable HTTP transport
//!
//! It is used by `onecall-cli`, and never reads configuration sources itself.

pub mod client;
pub mod error;
pub mod model;
pub mod request;
pub mod section;
pub mod transport;

pub use client::WeatherClient;
pub use error::{OneCallError, Result};
pub use model::{
    Alert, Condition, CurrentWeather, DailyFeelsLike, DailyForecast, DailyTemperature,
    HourlyForecast, MinutelyForecast, Precipitation, WeatherSnapshot,
};
pub use request::{ONECALL_ENDPOINT, RequestConfig, UnknownUnits, Units};
pub use section::{Section, Sections};
pub use transport::{HttpTransport, RawResponse, Transport};
