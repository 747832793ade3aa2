//! CLI command handlers.

mod artists;
mod config;
mod extract;
mod playlists;

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use festival_sync_core::SpotifyClient;
use serde::Serialize;

use crate::app_config::LoadedConfig;
use crate::cli::{Cli, Command, ConfigCommand, SpotifyAuthArgs};
use crate::config_runtime::Settings;

pub(crate) const SPOTIFY_TOKEN_ENV: &str = "SPOTIFY_ACCESS_TOKEN";
pub(crate) const VISION_KEY_ENV: &str = "GOOGLE_VISION_API_KEY";

/// Runs the parsed subcommand.
pub(crate) async fn dispatch(cli: &Cli, settings: &Settings, loaded: &LoadedConfig) -> Result<()> {
    match &cli.command {
        Command::Extract { file, noise_file } => {
            extract::run_extract_command(file.as_deref(), noise_file.as_deref(), settings)
        }
        Command::Ocr {
            image,
            api_key,
            noise_file,
        } => {
            extract::run_ocr_command(image, api_key.as_deref(), noise_file.as_deref(), settings)
                .await
        }
        Command::FindArtists { names, auth } => {
            artists::run_find_artists_command(names, auth, settings).await
        }
        Command::Alternatives { name, auth } => {
            artists::run_alternatives_command(name, auth, settings).await
        }
        Command::Autocomplete { query, auth } => {
            artists::run_autocomplete_command(query, auth, settings).await
        }
        Command::Playlists { auth } => playlists::run_playlists_command(auth, settings).await,
        Command::Compare {
            artists,
            playlists,
            auth,
        } => playlists::run_compare_command(artists, playlists, auth, settings).await,
        Command::CreatePlaylist {
            artists,
            name,
            auth,
        } => {
            playlists::run_create_playlist_command(artists, name.as_deref(), auth, settings).await
        }
        Command::Config {
            command: ConfigCommand::Show,
        } => config::run_config_show_command(settings, loaded),
    }
}

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Cannot serialize output")?;
    println!("{rendered}");
    Ok(())
}

/// Flag value first, then the environment variable; blank values count as missing.
pub(crate) fn resolve_secret(flag: Option<&str>, env_name: &str) -> Option<String> {
    flag.map(str::to_string)
        .or_else(|| std::env::var(env_name).ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn spotify_client(auth: &SpotifyAuthArgs, settings: &Settings) -> Result<SpotifyClient> {
    let Some(token) = resolve_secret(auth.token.as_deref(), SPOTIFY_TOKEN_ENV) else {
        bail!("No Spotify access token. Pass --token or set {SPOTIFY_TOKEN_ENV}.");
    };
    SpotifyClient::with_options(
        token,
        settings.spotify_api_base.as_str(),
        settings.http_timeouts,
    )
    .context("Cannot create Spotify client")
}

/// Reads a file, or all of stdin when no file is given and stdin is piped.
pub(crate) fn read_text_input(file: Option<&Path>) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read input file '{}'", path.display()));
    }
    if io::stdin().is_terminal() {
        bail!("No input provided. Pass a file or pipe text via stdin.");
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Cannot read stdin")?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_secret_prefers_flag() {
        assert_eq!(
            resolve_secret(Some(" from-flag "), "FESTIVAL_SYNC_TEST_UNSET_VAR"),
            Some("from-flag".to_string())
        );
    }

    #[test]
    fn test_resolve_secret_blank_is_missing() {
        assert_eq!(resolve_secret(Some("  "), "FESTIVAL_SYNC_TEST_UNSET_VAR"), None);
        assert_eq!(resolve_secret(None, "FESTIVAL_SYNC_TEST_UNSET_VAR"), None);
    }

    #[test]
    fn test_read_text_input_missing_file() {
        let err = read_text_input(Some(Path::new("/nonexistent/lineup.txt"))).unwrap_err();
        assert!(err.to_string().contains("Cannot read input file"));
    }
}
