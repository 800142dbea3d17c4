use thiserror::Error;

/// Boxed cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum OneCallError {
    /// Rejected by `RequestConfig::build`; nothing was sent.
    #[error("Invalid request configuration: {0}")]
    Configuration(String),

    /// DNS, connect, TLS or body-read failure. No retry is attempted.
    #[error("Failed to send request to OpenWeather: {0}")]
    Transport(#[source] BoxError),

    #[error("OpenWeather request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse OpenWeather One Call JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl OneCallError {
    /// HTTP status code, when the provider answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            OneCallError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T, E = OneCallError> = std::result::Result<T, E>;
