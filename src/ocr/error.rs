//! Error types for the OCR client.

use thiserror::Error;

/// Errors that can occur while running text detection.
#[derive(Debug, Error)]
pub enum OcrError {
    /// No image data was supplied.
    #[error("no image data provided")]
    EmptyImage,

    /// The image payload is not valid base64.
    #[error("image data is not valid base64: {source}")]
    InvalidBase64 {
        #[source]
        source: base64::DecodeError,
    },

    /// Transport-level failure reaching the Vision API.
    #[error("network error calling Vision API: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    /// The API key was rejected (HTTP 401/403).
    #[error("Vision API rejected the credentials (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// Any other non-2xx response.
    #[error("Vision API returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("cannot decode Vision API response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// The per-image response carried an error object.
    #[error("Vision API could not process the image: {message}")]
    Api { message: String },

    /// Client could not be constructed.
    #[error("invalid Vision client configuration: {reason}")]
    Config { reason: String },
}

impl OcrError {
    /// Maps a non-2xx status to [`OcrError::Authentication`] or [`OcrError::HttpStatus`].
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Authentication { status, message },
            _ => Self::HttpStatus { status, message },
        }
    }

    /// Wraps a transport error, dropping the request URL it carries.
    pub fn network(source: reqwest::Error) -> Self {
        Self::Network {
            source: source.without_url(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_auth_codes() {
        assert!(matches!(
            OcrError::from_status(401, "bad key"),
            OcrError::Authentication { status: 401, .. }
        ));
        assert!(matches!(
            OcrError::from_status(403, "disabled"),
            OcrError::Authentication { status: 403, .. }
        ));
    }

    #[test]
    fn test_from_status_other_codes() {
        let err = OcrError::from_status(503, "unavailable");
        assert!(matches!(err, OcrError::HttpStatus { status: 503, .. }));
        assert_eq!(err.to_string(), "Vision API returned HTTP 503: unavailable");
    }
}
