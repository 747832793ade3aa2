//! Effective settings: CLI flags over config file over built-in defaults.

use std::path::PathBuf;

use festival_sync_core::ocr::DEFAULT_VISION_API_BASE;
use festival_sync_core::spotify::DEFAULT_SPOTIFY_API_BASE;
use festival_sync_core::{DEFAULT_MAX_RETRIES, HttpTimeouts};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) spotify_api_base: String,
    pub(crate) vision_api_base: String,
    pub(crate) max_retries: u32,
    pub(crate) noise_keywords_file: Option<PathBuf>,
    pub(crate) http_timeouts: HttpTimeouts,
    pub(crate) verbose: u8,
    pub(crate) quiet: bool,
    pub(crate) debug: bool,
    /// Verbosity came from the command line, so it beats `RUST_LOG`.
    pub(crate) force_cli_log_level: bool,
}

pub(crate) fn resolve_settings(cli: &Cli, file_config: Option<&FileConfig>) -> Settings {
    let file_config = file_config.cloned().unwrap_or_default();
    let defaults = HttpTimeouts::default();

    let mut settings = Settings {
        spotify_api_base: file_config
            .spotify_api_base
            .unwrap_or_else(|| DEFAULT_SPOTIFY_API_BASE.to_string()),
        vision_api_base: file_config
            .vision_api_base
            .unwrap_or_else(|| DEFAULT_VISION_API_BASE.to_string()),
        max_retries: cli
            .max_retries
            .or(file_config.max_retries)
            .unwrap_or(DEFAULT_MAX_RETRIES),
        noise_keywords_file: file_config.noise_keywords_file,
        http_timeouts: HttpTimeouts::new(
            file_config
                .connect_timeout_secs
                .unwrap_or(defaults.connect_timeout_secs),
            file_config
                .read_timeout_secs
                .unwrap_or(defaults.read_timeout_secs),
        ),
        verbose: cli.verbose,
        quiet: cli.quiet,
        debug: false,
        force_cli_log_level: cli.verbose > 0 || cli.quiet,
    };

    if !settings.force_cli_log_level
        && let Some(verbosity) = file_config.verbosity
    {
        apply_config_verbosity(&mut settings, verbosity);
    }
    settings
}

fn apply_config_verbosity(settings: &mut Settings, verbosity: VerbositySetting) {
    let (verbose, quiet, debug) = match verbosity {
        VerbositySetting::Default => (0, false, false),
        VerbositySetting::Verbose => (1, false, false),
        VerbositySetting::Quiet => (0, true, false),
        VerbositySetting::Debug => (0, false, true),
    };
    settings.verbose = verbose;
    settings.quiet = quiet;
    settings.debug = debug;
}

pub(crate) fn resolve_default_log_level(settings: &Settings) -> &'static str {
    if settings.quiet {
        "error"
    } else if settings.debug {
        "trace"
    } else {
        match settings.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

pub(crate) fn verbosity_label(verbose: u8, quiet: bool, debug: bool) -> &'static str {
    if debug {
        VerbositySetting::Debug.as_str()
    } else if quiet {
        VerbositySetting::Quiet.as_str()
    } else if verbose == 0 {
        VerbositySetting::Default.as_str()
    } else if verbose == 1 {
        VerbositySetting::Verbose.as_str()
    } else {
        VerbositySetting::Debug.as_str()
    }
}
