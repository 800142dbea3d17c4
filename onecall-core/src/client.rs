use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    error::{OneCallError, Result},
    model::WeatherSnapshot,
    request::{ONECALL_ENDPOINT, RequestConfig, Units},
    section::Sections,
    transport::{HttpTransport, Transport},
};

/// Client for the One Call endpoint.
///
/// Holds the current [`RequestConfig`] and a [`Transport`]. Each [`fetch`](Self::fetch)
/// works on the config in effect when it starts. [`configure`](Self::configure) needs
/// `&mut self`, so replacing the config while a fetch borrows the client does not compile.
#[derive(Debug, Clone)]
pub struct WeatherClient<T = HttpTransport> {
    config: Arc<RequestConfig>,
    transport: T,
    endpoint: String,
}

impl WeatherClient<HttpTransport> {
    pub fn new(config: RequestConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> WeatherClient<T> {
    pub fn with_transport(config: RequestConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            endpoint: ONECALL_ENDPOINT.to_string(),
        }
    }

    /// Point the client at another base URL (a proxy or a mock server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL for the current config.
    pub fn url(&self) -> String {
        self.config.url_for(&self.endpoint)
    }

    /// Replace the request config. On error the previous config stays in place.
    pub fn configure(
        &mut self,
        latitude: f64,
        longitude: f64,
        sections: Sections,
        units: Option<Units>,
        language: Option<&str>,
        api_key: impl Into<String>,
    ) -> Result<()> {
        let config =
            RequestConfig::build(latitude, longitude, sections, units, language, api_key)?;
        self.set_config(config);
        Ok(())
    }

    pub fn set_config(&mut self, config: RequestConfig) {
        self.config = Arc::new(config);
    }

    /// Issue exactly one GET and decode the body.
    ///
    /// # Errors
    ///
    /// - [`OneCallError::Transport`] when the request could not be completed.
    /// - [`OneCallError::HttpStatus`] for any non-2xx status; the body is not decoded.
    /// - [`OneCallError::Decode`] when a 2xx body is not a valid One Call document.
    #[instrument(skip_all, fields(lat = self.config.latitude(), lon = self.config.longitude()))]
    pub async fn fetch(&self) -> Result<WeatherSnapshot> {
        let config = Arc::clone(&self.config);

        debug!(url = %config.redacted_url_for(&self.endpoint), "requesting One Call data");

        let res = self
            .transport
            .get(&config.url_for(&self.endpoint))
            .await
            .map_err(OneCallError::Transport)?;

        debug!(status = res.status, bytes = res.body.len(), "received response");

        if !res.is_success() {
            warn!(status = res.status, "One Call request was rejected");
            return Err(OneCallError::HttpStatus {
                status: res.status,
                body: truncate_body(&res.body),
            });
        }

        let snapshot: WeatherSnapshot = serde_json::from_str(&res.body)?;
        Ok(snapshot)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
