//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.rentdesk/config.toml`. If missing on first run, a
//! commented-out default is generated so operators can discover all options.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;

use crate::core::billing::BillingPolicy;
use crate::core::listing::DEFAULT_PAGE_SIZE;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RentdeskConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub billing: BillingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub page_size: Option<usize>,
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BillingConfig {
    pub grace_minutes: Option<u32>,
    pub minimum_days: Option<u32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MINIMUM_DAYS: u32 = 1;
pub const DEFAULT_GRACE_MINUTES: u32 = 0;
const DATA_FILE_NAME: &str = "data.json";
const LOG_FILE_NAME: &str = "rentdesk.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub page_size: usize,
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub billing: BillingPolicy,
}

/// Values taken from command-line flags (None = not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub page_size: Option<usize>,
    pub data_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.rentdesk`, where config, data and logs live by default.
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".rentdesk"))
        .unwrap_or_else(|| PathBuf::from(".rentdesk"))
}

/// Returns the path to `~/.rentdesk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".rentdesk").join("config.toml"))
}

/// Where a loaded config came from.
///
/// Loading happens before the file logger exists (the log lives next to the
/// data file, which the config may move), so the outcome is returned and
/// logged by the caller once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file existed; a commented-out default was written here.
    Generated(PathBuf),
    /// No file existed and the default could not be written.
    NotWritten { path: PathBuf, reason: String },
    /// No home directory, built-in defaults only.
    Defaults,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigSource::NotWritten { path, reason } => {
                warn!("No config file found, failed to write default at {}: {}", path.display(), reason)
            }
            ConfigSource::Defaults => {
                warn!("Could not determine home directory, using default config")
            }
        }
    }
}

/// Load config from `~/.rentdesk/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RentdeskConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<(RentdeskConfig, ConfigSource), ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok((RentdeskConfig::default(), ConfigSource::Defaults)),
    }
}

pub fn load_config_from(path: &Path) -> Result<(RentdeskConfig, ConfigSource), ConfigError> {
    if !path.exists() {
        let source = match generate_default_config(path) {
            Ok(()) => ConfigSource::Generated(path.to_path_buf()),
            Err(e) => ConfigSource::NotWritten {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        };
        return Ok((RentdeskConfig::default(), source));
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RentdeskConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# Rentdesk Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# page_size = 2                      # Rows per page in every list (RENTDESK_PAGE_SIZE)
# data_file = "/path/to/data.json"   # Where records are stored (RENTDESK_DATA_FILE)

# [billing]
# grace_minutes = 0                  # Partial days up to this long are not billed
# minimum_days = 1                   # Every rental bills at least this many days
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &RentdeskConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &RentdeskConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let home = home_dir();

    // Page size: CLI → env → config → default; zero falls back to default
    let page_size = cli
        .page_size
        .or_else(|| env("RENTDESK_PAGE_SIZE").and_then(|v| v.trim().parse().ok()))
        .or(config.general.page_size)
        .filter(|&n| {
            if n == 0 {
                warn!("Ignoring page_size = 0, using {}", DEFAULT_PAGE_SIZE);
            }
            n > 0
        })
        .unwrap_or(DEFAULT_PAGE_SIZE);

    // Data file: CLI → env → config → default
    let data_file = cli
        .data_file
        .clone()
        .or_else(|| env("RENTDESK_DATA_FILE").map(PathBuf::from))
        .or_else(|| config.general.data_file.clone())
        .unwrap_or_else(|| home.join(DATA_FILE_NAME));

    let log_file = data_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME));

    let billing = BillingPolicy {
        grace: Duration::minutes(i64::from(
            config.billing.grace_minutes.unwrap_or(DEFAULT_GRACE_MINUTES),
        )),
        minimum_days: config.billing.minimum_days.unwrap_or(DEFAULT_MINIMUM_DAYS),
    };

    ResolvedConfig {
        page_size,
        data_file,
        log_file,
        billing,
    }
}
