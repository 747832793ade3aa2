//! Artist search command handlers.

use std::io::{self, BufRead, IsTerminal};

use anyhow::{Context, Result, bail};
use festival_sync_core::workflow::{
    artist_alternatives, autocomplete_artists, find_artists_with_progress,
};
use indicatif::{ProgressBar, ProgressStyle};

use super::{print_json, spotify_client};
use crate::cli::SpotifyAuthArgs;
use crate::config_runtime::Settings;
use crate::terminal;

fn read_names_from_stdin() -> Result<Vec<String>> {
    if io::stdin().is_terminal() {
        bail!("No artist names provided. Pass names as arguments or pipe one per line.");
    }
    let mut names = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Cannot read stdin")?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

fn search_progress_bar(len: usize, quiet: bool) -> ProgressBar {
    let enabled = terminal::should_use_progress_bar(
        io::stderr().is_terminal(),
        quiet,
        terminal::is_dumb_terminal(),
    );
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

pub(crate) async fn run_find_artists_command(
    names: &[String],
    auth: &SpotifyAuthArgs,
    settings: &Settings,
) -> Result<()> {
    let names = if names.is_empty() {
        read_names_from_stdin()?
    } else {
        names.to_vec()
    };
    let client = spotify_client(auth, settings)?;

    let bar = search_progress_bar(names.len(), settings.quiet);
    let found = find_artists_with_progress(&client, &names, |_, name| {
        bar.set_message(name.to_string());
        bar.inc(1);
    })
    .await;
    bar.finish_and_clear();

    print_json(&found.context("Artist search failed")?)
}

pub(crate) async fn run_alternatives_command(
    name: &str,
    auth: &SpotifyAuthArgs,
    settings: &Settings,
) -> Result<()> {
    let client = spotify_client(auth, settings)?;
    let alternatives = artist_alternatives(&client, name)
        .await
        .with_context(|| format!("Cannot find alternatives for '{name}'"))?;
    print_json(&alternatives)
}

pub(crate) async fn run_autocomplete_command(
    query: &str,
    auth: &SpotifyAuthArgs,
    settings: &Settings,
) -> Result<()> {
    let client = spotify_client(auth, settings)?;
    let suggestions = autocomplete_artists(&client, query)
        .await
        .with_context(|| format!("Cannot fetch suggestions for '{query}'"))?;
    print_json(&suggestions)
}
