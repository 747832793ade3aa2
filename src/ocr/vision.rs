//! Google Cloud Vision `TEXT_DETECTION` over REST.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::http_client::{HttpTimeouts, build_http_client};

use super::OcrError;

/// Default Vision API base URL.
pub const DEFAULT_VISION_API_BASE: &str = "https://vision.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Status {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Status,
}

/// Vision API client bound to one API key.
pub struct VisionClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl VisionClient {
    /// Creates a client against the public Vision API.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::Config`] if the key is empty or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, OcrError> {
        Self::with_options(api_key, DEFAULT_VISION_API_BASE, HttpTimeouts::default())
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`VisionClient::new`], plus an unparseable base URL.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, OcrError> {
        Self::with_options(api_key, base_url, HttpTimeouts::default())
    }

    /// Creates a client with an explicit base URL and timeouts.
    ///
    /// # Errors
    ///
    /// Same as [`VisionClient::with_base_url`].
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeouts: HttpTimeouts,
    ) -> Result<Self, OcrError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(OcrError::config("API key is empty"));
        }
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| OcrError::config(format!("invalid base URL '{base_url}': {e}")))?;
        let client = build_http_client(timeouts)
            .map_err(|e| OcrError::config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Runs text detection on a base64 image (a `data:` URL prefix is accepted).
    ///
    /// Returns the full detected text block, or `None` when the image has no text.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError`] for empty or invalid input, transport failure,
    /// non-2xx responses and per-image API errors.
    #[instrument(skip_all, fields(payload_len = image_base64.len()))]
    pub async fn detect_text(&self, image_base64: &str) -> Result<Option<String>, OcrError> {
        let content = strip_data_url_prefix(image_base64);
        if content.is_empty() {
            return Err(OcrError::EmptyImage);
        }
        STANDARD
            .decode(content)
            .map_err(|source| OcrError::InvalidBase64 { source })?;

        let url = Url::parse(&format!("{}/v1/images:annotate", self.base_url))
            .map_err(|e| OcrError::config(format!("invalid endpoint URL: {e}")))?;

        let body = json!({
            "requests": [{
                "image": { "content": content },
                "features": [{ "type": "TEXT_DETECTION" }],
            }]
        });

        info!("Sending image to Vision API");
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(OcrError::network)?;

        let status = response.status();
        let text = response.text().await.map_err(OcrError::network)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                });
            warn!(status = status.as_u16(), %message, "Vision API error");
            return Err(OcrError::from_status(status.as_u16(), message));
        }

        let parsed: AnnotateResponse =
            serde_json::from_str(&text).map_err(|source| OcrError::Decode { source })?;
        let Some(first) = parsed.responses.into_iter().next() else {
            debug!("Vision API returned no responses");
            return Ok(None);
        };
        if let Some(error) = first.error {
            return Err(OcrError::Api {
                message: error.message.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        let full_text = first
            .text_annotations
            .into_iter()
            .next()
            .and_then(|annotation| annotation.description)
            .filter(|description| !description.trim().is_empty());
        if full_text.is_none() {
            info!("No text detected");
        }
        Ok(full_text)
    }
}

impl std::fmt::Debug for VisionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Removes a `data:<mime>;base64,` prefix, if present, and trims whitespace.
#[must_use]
pub fn strip_data_url_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    match trimmed.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest.trim(),
        _ => trimmed,
    }
}

/// Base64-encodes raw image bytes for [`VisionClient::detect_text`].
#[must_use]
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
