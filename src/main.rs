//! CLI entry point for festival-sync.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;
mod config_runtime;
mod terminal;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let loaded = app_config::load_config(cli.config.as_deref())?;
    let settings = config_runtime::resolve_settings(&cli, loaded.config.as_ref());

    let no_color = terminal::no_color_env_requested() || terminal::is_dumb_terminal();
    terminal::init_tracing(
        config_runtime::resolve_default_log_level(&settings),
        settings.force_cli_log_level,
        no_color,
    );
    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        config_loaded = loaded.loaded_from_file,
        "CLI arguments parsed"
    );

    commands::dispatch(&cli, &settings, &loaded).await
}
