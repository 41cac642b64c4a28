//! Driver error types.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a browser driver backend.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The automation endpoint could not be reached.
    #[error("Connection failed: {0}. Start a WebDriver server (e.g. chromedriver --port=4444)")]
    Connection(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a protocol error.
    #[error("WebDriver error: {error}: {message}")]
    Protocol { error: String, message: String },

    /// No element matched the query.
    #[error("Element not found: {0}")]
    NoSuchElement(String),

    /// A bounded wait expired.
    #[error("Timed out after {}ms waiting for {what}", waited.as_millis())]
    Timeout { what: String, waited: Duration },

    /// The backend returned something we could not interpret.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The session was already closed.
    #[error("Session closed")]
    SessionClosed,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Screenshot payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl From<reqwest::Error> for DriverError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            DriverError::Connection(e.to_string())
        } else {
            DriverError::Http(e.to_string())
        }
    }
}

impl DriverError {
    /// Whether the failure came from waiting on or locating an element.
    pub fn is_element_failure(&self) -> bool {
        matches!(self, Self::NoSuchElement(_) | Self::Timeout { .. })
    }

    /// Whether the failure came from the transport or the browser session.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Http(_) | Self::SessionClosed | Self::InvalidResponse(_)
        )
    }
}
