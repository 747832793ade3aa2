//! Extract and OCR command handlers.

use std::path::Path;

use anyhow::{Context, Result, bail};
use festival_sync_core::lineup::{CandidateExtractor, extractor_from_keyword_file};
use festival_sync_core::ocr::{VisionClient, encode_image};
use serde::Serialize;
use tracing::{debug, info};

use super::{VISION_KEY_ENV, print_json, read_text_input, resolve_secret};
use crate::config_runtime::Settings;

#[derive(Debug, Serialize)]
struct OcrOutput {
    text: Option<String>,
    candidates: Vec<String>,
}

fn build_extractor(noise_file: Option<&Path>, settings: &Settings) -> Result<CandidateExtractor> {
    match noise_file.or(settings.noise_keywords_file.as_deref()) {
        Some(path) => {
            debug!(path = %path.display(), "Loading noise keywords");
            extractor_from_keyword_file(path)
        }
        None => Ok(CandidateExtractor::default()),
    }
}

pub(crate) fn run_extract_command(
    file: Option<&Path>,
    noise_file: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let extractor = build_extractor(noise_file, settings)?;
    let text = read_text_input(file)?;
    let candidates = extractor.extract(&text);
    info!(candidates = candidates.len(), "Extracted candidates");
    print_json(&candidates)
}

pub(crate) async fn run_ocr_command(
    image: &Path,
    api_key: Option<&str>,
    noise_file: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let Some(api_key) = resolve_secret(api_key, VISION_KEY_ENV) else {
        bail!("No Vision API key. Pass --api-key or set {VISION_KEY_ENV}.");
    };
    let extractor = build_extractor(noise_file, settings)?;

    let bytes = std::fs::read(image)
        .with_context(|| format!("Cannot read image '{}'", image.display()))?;
    let client = VisionClient::with_options(
        api_key,
        settings.vision_api_base.as_str(),
        settings.http_timeouts,
    )
    .context("Cannot create Vision client")?;

    let text = client
        .detect_text(&encode_image(&bytes))
        .await
        .with_context(|| format!("Text detection failed for '{}'", image.display()))?;
    let candidates = text
        .as_deref()
        .map(|text| extractor.extract(text))
        .unwrap_or_default();
    info!(candidates = candidates.len(), "Extracted candidates from image");

    print_json(&OcrOutput { text, candidates })
}
