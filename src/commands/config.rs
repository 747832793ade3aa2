//! Config command handlers: show effective configuration.

use anyhow::Result;

use crate::app_config::LoadedConfig;
use crate::config_runtime::{Settings, verbosity_label};

use super::{SPOTIFY_TOKEN_ENV, VISION_KEY_ENV, resolve_secret};

pub(crate) fn run_config_show_command(settings: &Settings, loaded: &LoadedConfig) -> Result<()> {
    let resolved_path = loaded.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("spotify_api_base = {}", settings.spotify_api_base);
    println!("vision_api_base = {}", settings.vision_api_base);
    println!("max_retries = {}", settings.max_retries);
    println!(
        "noise_keywords_file = {}",
        settings
            .noise_keywords_file
            .as_ref()
            .map_or_else(|| "<built-in>".to_string(), |p| p.display().to_string())
    );
    println!(
        "connect_timeout_secs = {}",
        settings.http_timeouts.connect_timeout_secs
    );
    println!("read_timeout_secs = {}", settings.http_timeouts.read_timeout_secs);
    println!(
        "verbosity = {}",
        verbosity_label(settings.verbose, settings.quiet, settings.debug)
    );
    println!(
        "spotify_token = {}",
        secret_status(resolve_secret(None, SPOTIFY_TOKEN_ENV).is_some())
    );
    println!(
        "vision_api_key = {}",
        secret_status(resolve_secret(None, VISION_KEY_ENV).is_some())
    );

    Ok(())
}

fn secret_status(present: bool) -> &'static str {
    if present { "set (from environment)" } else { "not set" }
}
