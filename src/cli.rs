//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Match a festival lineup poster against your Spotify playlists.
///
/// Reads OCR text (or an image), extracts artist names, finds them on
/// Spotify and compares them with your playlists. Results are printed as
/// JSON on stdout; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "festival-sync")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: $XDG_CONFIG_HOME/festival-sync/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum attempts per page when Spotify rate-limits (0-10)
    #[arg(short = 'r', long, global = true, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub max_retries: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Spotify access token, taken from `SPOTIFY_ACCESS_TOKEN` when omitted.
#[derive(Args, Debug, Clone, Default)]
pub struct SpotifyAuthArgs {
    /// Spotify OAuth access token
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract candidate artist names from OCR text
    Extract {
        /// Text file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Noise keyword file, one keyword per line
        #[arg(long, value_name = "PATH")]
        noise_file: Option<PathBuf>,
    },

    /// Run text detection on a poster image and extract candidates
    Ocr {
        /// Image file (JPEG, PNG, ...)
        image: PathBuf,

        /// Google Cloud Vision API key (default: $GOOGLE_VISION_API_KEY)
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,

        /// Noise keyword file, one keyword per line
        #[arg(long, value_name = "PATH")]
        noise_file: Option<PathBuf>,
    },

    /// Resolve artist names to Spotify artists
    FindArtists {
        /// Artist names (reads one name per stdin line when omitted)
        names: Vec<String>,

        #[command(flatten)]
        auth: SpotifyAuthArgs,
    },

    /// Show up to five Spotify matches for one name
    Alternatives {
        name: String,

        #[command(flatten)]
        auth: SpotifyAuthArgs,
    },

    /// Suggest artists for a partial name
    Autocomplete {
        query: String,

        #[command(flatten)]
        auth: SpotifyAuthArgs,
    },

    /// List your playlists
    Playlists {
        #[command(flatten)]
        auth: SpotifyAuthArgs,
    },

    /// Intersect found artists with selected playlists
    Compare {
        /// JSON file with found artists (output of `find-artists`)
        #[arg(long, value_name = "JSON")]
        artists: PathBuf,

        /// Playlist id to compare against (repeatable)
        #[arg(long = "playlist", value_name = "ID", required = true)]
        playlists: Vec<String>,

        #[command(flatten)]
        auth: SpotifyAuthArgs,
    },

    /// Create a playlist from the top tracks of the given artists
    CreatePlaylist {
        /// JSON file with artists (output of `find-artists` or `compare`)
        #[arg(long, value_name = "JSON")]
        artists: PathBuf,

        /// Playlist name (default: "Festival Sync Matches (YYYY-MM-DD)")
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        auth: SpotifyAuthArgs,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_extract_defaults() {
        let cli = Cli::try_parse_from(["festival-sync", "extract"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(cli.max_retries.is_none());
        match cli.command {
            Command::Extract { file, noise_file } => {
                assert!(file.is_none());
                assert!(noise_file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let cli = Cli::try_parse_from(["festival-sync", "-vv", "extract"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["festival-sync", "extract", "--verbose"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_cli_quiet_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["festival-sync", "playlists", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_subcommand_required() {
        let err = Cli::try_parse_from(["festival-sync"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Cli::try_parse_from(["festival-sync", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Cli::try_parse_from(["festival-sync", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    // ==================== Max Retries Tests ====================

    #[test]
    fn test_cli_max_retries_range() {
        let cli = Cli::try_parse_from(["festival-sync", "-r", "0", "playlists"]).unwrap();
        assert_eq!(cli.max_retries, Some(0));

        let cli =
            Cli::try_parse_from(["festival-sync", "--max-retries", "10", "playlists"]).unwrap();
        assert_eq!(cli.max_retries, Some(10));

        let err = Cli::try_parse_from(["festival-sync", "-r", "11", "playlists"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    // ==================== Subcommand Tests ====================

    #[test]
    fn test_cli_find_artists_positional_names_and_token() {
        let cli = Cli::try_parse_from([
            "festival-sync",
            "find-artists",
            "Bicep",
            "Floating Points",
            "--token",
            "abc",
        ])
        .unwrap();
        match cli.command {
            Command::FindArtists { names, auth } => {
                assert_eq!(names, ["Bicep", "Floating Points"]);
                assert_eq!(auth.token.as_deref(), Some("abc"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_compare_repeated_playlists() {
        let cli = Cli::try_parse_from([
            "festival-sync",
            "compare",
            "--artists",
            "found.json",
            "--playlist",
            "p1",
            "--playlist",
            "p2",
        ])
        .unwrap();
        match cli.command {
            Command::Compare {
                artists, playlists, ..
            } => {
                assert_eq!(artists, PathBuf::from("found.json"));
                assert_eq!(playlists, ["p1", "p2"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_compare_requires_playlist() {
        let err = Cli::try_parse_from(["festival-sync", "compare", "--artists", "found.json"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_create_playlist_with_name() {
        let cli = Cli::try_parse_from([
            "festival-sync",
            "create-playlist",
            "--artists",
            "matches.json",
            "--name",
            "Primavera 2026",
        ])
        .unwrap();
        match cli.command {
            Command::CreatePlaylist { name, .. } => {
                assert_eq!(name.as_deref(), Some("Primavera 2026"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_config_show_with_global_config_path() {
        let cli = Cli::try_parse_from([
            "festival-sync",
            "--config",
            "/tmp/fs.toml",
            "config",
            "show",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/fs.toml")));
        assert!(matches!(
            cli.command,
            Command::Config {
                command: ConfigCommand::Show
            }
        ));
    }

    #[test]
    fn test_cli_invalid_subcommand_returns_error() {
        let err = Cli::try_parse_from(["festival-sync", "download"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }
}
