//! Error types for the Ambari REST client.
//!
//! Every failure talking to Ambari lands in exactly one category so the
//! caller can tell a bad password from an unreachable server or an invalid
//! certificate.

use thiserror::Error;

/// Result type alias for Ambari client operations.
pub type AmbariResult<T> = Result<T, AmbariError>;

/// Error type for Ambari client operations.
#[derive(Error, Debug)]
pub enum AmbariError {
    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// The server could not be reached (DNS, refused, timeout, reset).
    #[error("Failed to connect to Ambari server at '{url}': {message}")]
    Connection { url: String, message: String },

    /// TLS certificate validation failed.
    #[error("TLS validation failed for '{url}': {message} (set validate_ssl: false to accept self-signed certificates)")]
    Tls { url: String, message: String },

    // ========================================================================
    // Server Responses
    // ========================================================================
    /// Ambari rejected the configured credentials.
    #[error("Authentication to Ambari failed with HTTP {status} for user '{username}'")]
    Authentication { username: String, status: u16 },

    /// Ambari answered with a non-success status.
    #[error("Ambari API request '{url}' failed with HTTP {status}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    /// Ambari manages no cluster.
    #[error("Ambari server reports no clusters")]
    NoCluster,

    /// The response body did not match the expected shape.
    #[error("Unexpected response from '{url}': {message}")]
    Decode { url: String, message: String },

    // ========================================================================
    // Local Errors
    // ========================================================================
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// A request URL could not be built.
    #[error("Invalid Ambari URL: {0}")]
    Url(#[from] url::ParseError),
}

impl AmbariError {
    /// Whether this error means the server was never reached.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, AmbariError::Connection { .. } | AmbariError::Tls { .. })
    }

    /// Classify a transport-level `reqwest` failure for `url`.
    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            return AmbariError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            };
        }

        let message = error_chain(&err);
        if err.is_timeout() {
            return AmbariError::Connection {
                url: url.to_string(),
                message: format!("request timed out: {}", message),
            };
        }
        // rustls rejections surface as connect errors; only the text tells them apart
        if err.is_connect() && is_certificate_failure(&message) {
            return AmbariError::Tls {
                url: url.to_string(),
                message,
            };
        }

        AmbariError::Connection {
            url: url.to_string(),
            message,
        }
    }
}

/// Flatten an error and all of its sources into one message.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// rustls reports rejected certificates as "invalid peer certificate: ...".
pub(crate) fn is_certificate_failure(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("certificate") || lower.contains("unknownissuer") || lower.contains("tls handshake")
}
