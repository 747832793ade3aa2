//! Festival Sync Core Library
//!
//! Turns a photographed festival lineup into Spotify matches: recognize the
//! poster text, extract candidate artist names, resolve them on Spotify,
//! compare them with the user's playlists and build a playlist of the
//! overlap.
//!
//! # Architecture
//!
//! - [`lineup`] - OCR text to deduplicated candidate names, noise rules, review state
//! - [`paging`] - Paginated fetch-with-retry over rate-limited endpoints
//! - [`spotify`] - Per-session Spotify Web API client and pagers
//! - [`ocr`] - Google Cloud Vision text detection
//! - [`workflow`] - Find, compare and create operations tying the above together

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod http_client;
mod user_agent;

pub mod lineup;
pub mod ocr;
pub mod paging;
pub mod spotify;
pub mod workflow;

// Re-export commonly used types
pub use http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts};
pub use lineup::{CandidateExtractor, CandidateSelection, NoiseRules, extract_candidates};
pub use ocr::{OcrError, VisionClient};
pub use paging::{DEFAULT_MAX_RETRIES, Page, PageError, PageFetcher, fetch_all_pages};
pub use spotify::{SpotifyClient, SpotifyError};
pub use workflow::{FoundArtist, SyncError};
