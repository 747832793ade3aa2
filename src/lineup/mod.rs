//! Lineup text parsing: OCR output to candidate artist names.
//!
//! This module turns the raw text recognized on a festival poster into a
//! deduplicated list of plausible artist names, dropping sponsor names,
//! stage labels and dates along the way.
//!
//! # Example
//!
//! ```
//! use festival_sync_core::lineup::{CandidateSelection, extract_candidates};
//!
//! let names = extract_candidates("SPONSORED BY\nBicep • Floating Points\nSAT 21 JUN");
//! assert_eq!(names, ["Bicep", "Floating Points"]);
//!
//! let mut review = CandidateSelection::from_candidates(names);
//! review.toggle(0);
//! assert_eq!(review.selected_names(), ["Floating Points"]);
//! ```

mod error;
mod extractor;
mod noise;
mod review;

pub use error::NoiseRulesError;
pub use extractor::{CandidateExtractor, MIN_CANDIDATE_LEN, extract_candidates};
pub use noise::{DEFAULT_DIGIT_RUN, DEFAULT_NOISE_KEYWORDS, NoiseRules};
pub use review::{CandidateEntry, CandidateSelection};

use std::path::Path;

use anyhow::{Context, Result};
use tracing::instrument;

/// Loads noise keywords from a file (one keyword per line).
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
/// Returns error if the file cannot be read.
#[instrument]
pub fn load_noise_keywords(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read noise keywords file '{}'", path.display()))?;

    let keywords = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();

    Ok(keywords)
}

/// Builds an extractor from a keyword file, keeping the default digit rule.
///
/// # Errors
/// Returns error if the file cannot be read or the rules cannot be compiled.
pub fn extractor_from_keyword_file(path: &Path) -> Result<CandidateExtractor> {
    let keywords = load_noise_keywords(path)?;
    let rules = NoiseRules::with_keywords(keywords)
        .with_context(|| format!("Invalid noise keywords in '{}'", path.display()))?;
    Ok(CandidateExtractor::new(rules))
}
