//! Error types for the Spotify Web API client.

use thiserror::Error;

use crate::paging::PageError;

/// Errors returned by [`SpotifyClient`](super::SpotifyClient) calls.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Transport-level failure (DNS, connection refused, TLS, timeout).
    #[error("network error calling Spotify {endpoint}: {source}")]
    Network {
        /// API path that was requested.
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response from the API.
    #[error("Spotify {endpoint} returned HTTP {status}{}", format_message(.message.as_deref()))]
    HttpStatus {
        endpoint: String,
        status: u16,
        /// Raw `Retry-After` header value, if present.
        retry_after: Option<String>,
        /// `error.message` from the response body, if it could be parsed.
        message: Option<String>,
    },

    /// Response body did not match the expected shape.
    #[error("cannot decode Spotify {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Client could not be constructed.
    #[error("invalid Spotify client configuration: {reason}")]
    Config { reason: String },
}

fn format_message(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl SpotifyError {
    /// Creates a network error from a reqwest error.
    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(
        endpoint: impl Into<String>,
        status: u16,
        retry_after: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self::HttpStatus {
            endpoint: endpoint.into(),
            status,
            retry_after,
            message,
        }
    }

    /// Creates a decode error.
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// HTTP status code, if the API answered.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for 401 (expired or revoked token).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Returns true for 403 (token lacks a required scope).
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status_code() == Some(403)
    }
}

impl PageError for SpotifyError {
    fn status(&self) -> Option<u16> {
        self.status_code()
    }

    fn retry_after(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { retry_after, .. } => retry_after.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_with_message() {
        let err = SpotifyError::http_status(
            "/v1/me",
            401,
            None,
            Some("The access token expired".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Spotify /v1/me returned HTTP 401: The access token expired"
        );
        assert!(err.is_unauthorized());
        assert!(!err.is_forbidden());
    }

    #[test]
    fn test_http_status_display_without_message() {
        let err = SpotifyError::http_status("/v1/search", 500, None, None);
        assert_eq!(err.to_string(), "Spotify /v1/search returned HTTP 500");
    }

    #[test]
    fn test_page_error_exposes_status_and_retry_after() {
        let err = SpotifyError::http_status("/v1/me/playlists", 429, Some("7".to_string()), None);
        assert_eq!(PageError::status(&err), Some(429));
        assert_eq!(PageError::retry_after(&err), Some("7"));
    }

    #[test]
    fn test_config_error_has_no_status() {
        let err = SpotifyError::config("empty access token");
        assert_eq!(PageError::status(&err), None);
        assert_eq!(PageError::retry_after(&err), None);
        assert!(err.to_string().contains("empty access token"));
    }
}
