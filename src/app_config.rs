//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// File configuration for festival-sync defaults.
///
/// Secrets (access token, API key) are never read from this file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Spotify Web API base URL.
    pub spotify_api_base: Option<String>,
    /// Google Cloud Vision API base URL.
    pub vision_api_base: Option<String>,
    /// Attempts per page on rate limiting (same range as CLI).
    pub max_retries: Option<u32>,
    /// Default noise keyword file for `extract` and `ocr`.
    pub noise_keywords_file: Option<PathBuf>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP whole-request timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(max_retries) = self.max_retries
            && max_retries > 10
        {
            bail!("Invalid config value for `max_retries`: {max_retries}. Expected range: 0..=10");
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        validate_base_url("spotify_api_base", self.spotify_api_base.as_deref())?;
        validate_base_url("vision_api_base", self.vision_api_base.as_deref())?;
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

fn validate_base_url(field: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let parsed = url::Url::parse(value)
        .with_context(|| format!("Invalid config value for `{field}`: '{value}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("Invalid config value for `{field}`: '{value}'. Expected an http(s) URL");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/festival-sync/config.toml`
/// 2. `$HOME/.config/festival-sync/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("festival-sync")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("festival-sync")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit_path`, or from the default path if present.
///
/// An explicit path that does not exist is an error; a missing default file is not.
pub fn load_config(explicit_path: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit_path {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
            loaded_from_file: true,
        });
    }

    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_number = line_index + 1;

        match key {
            "spotify_api_base" => {
                cfg.spotify_api_base = Some(string_value(key, value, line_number)?);
            }
            "vision_api_base" => {
                cfg.vision_api_base = Some(string_value(key, value, line_number)?);
            }
            "noise_keywords_file" => {
                cfg.noise_keywords_file =
                    Some(PathBuf::from(string_value(key, value, line_number)?));
            }
            "max_retries" => {
                let parsed = integer_value(key, value, line_number)?;
                let n = u32::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("max_retries out of range for u32"))?;
                cfg.max_retries = Some(n);
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(integer_value(key, value, line_number)?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(integer_value(key, value, line_number)?);
            }
            "verbosity" => {
                let parsed = string_value(key, value, line_number)?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_number}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn string_value(key: &str, value: &str, line_number: usize) -> Result<String> {
    parse_string_literal(value)
        .with_context(|| format!("Invalid `{key}` value on line {line_number}"))
}

fn integer_value(key: &str, value: &str, line_number: usize) -> Result<u64> {
    parse_integer_u64(value)
        .with_context(|| format!("Invalid `{key}` value on line {line_number}"))
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}
