//! Text recognition for lineup poster images.
//!
//! [`VisionClient`] sends one base64 image to the Google Cloud Vision
//! `images:annotate` endpoint and returns the full detected text block,
//! ready for [`crate::lineup::extract_candidates`].

mod error;
mod vision;

pub use error::OcrError;
pub use vision::{DEFAULT_VISION_API_BASE, VisionClient, encode_image, strip_data_url_prefix};
