//! Playlist command handlers.

use std::path::Path;

use anyhow::{Context, Result};
use festival_sync_core::workflow::{
    FoundArtist, compare_selected_playlists, create_playlist, list_playlists,
};
use tracing::info;

use super::{print_json, spotify_client};
use crate::cli::SpotifyAuthArgs;
use crate::config_runtime::Settings;

/// Loads a JSON array of artists as printed by `find-artists` or `compare`.
pub(crate) fn load_artists(path: &Path) -> Result<Vec<FoundArtist>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read artists file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid artists JSON in '{}'", path.display()))
}

pub(crate) async fn run_playlists_command(
    auth: &SpotifyAuthArgs,
    settings: &Settings,
) -> Result<()> {
    let client = spotify_client(auth, settings)?;
    let playlists = list_playlists(&client, settings.max_retries)
        .await
        .context("Cannot list playlists")?;
    print_json(&playlists)
}

pub(crate) async fn run_compare_command(
    artists_file: &Path,
    playlist_ids: &[String],
    auth: &SpotifyAuthArgs,
    settings: &Settings,
) -> Result<()> {
    let artists = load_artists(artists_file)?;
    let client = spotify_client(auth, settings)?;
    let matched =
        compare_selected_playlists(&client, &artists, playlist_ids, settings.max_retries)
            .await
            .context("Playlist comparison failed")?;
    info!(matched = matched.len(), "Matched festival artists");
    print_json(&matched)
}

pub(crate) async fn run_create_playlist_command(
    artists_file: &Path,
    name: Option<&str>,
    auth: &SpotifyAuthArgs,
    settings: &Settings,
) -> Result<()> {
    let artists = load_artists(artists_file)?;
    let client = spotify_client(auth, settings)?;
    let today = chrono::Local::now().date_naive();
    let created = create_playlist(&client, &artists, name, today)
        .await
        .context("Cannot create playlist")?;
    print_json(&created)
}
