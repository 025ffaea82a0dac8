//! Configuration loading and path resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is never fatal; startup continues on defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const ENV_CONFIG_PATH: &str = "MEDADMIN_CONFIG";

/// Environment variable naming the record fixtures file
pub const ENV_FIXTURES_PATH: &str = "MEDADMIN_FIXTURES";

/// Default HTTP port for the review service
pub const DEFAULT_PORT: u16 = 5740;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest accepted number of rows per page
pub const MAX_PAGE_SIZE: i64 = 10_000;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Interface to bind
    #[serde(default = "default_bind")]
    pub bind: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding `experiments` and `activity` records
    #[serde(default)]
    pub fixtures_path: Option<PathBuf>,

    /// Actor assumed when a request does not identify one
    #[serde(default)]
    pub default_actor: Option<String>,

    /// Rows per page in list responses
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            fixtures_path: None,
            default_actor: None,
            page_size: default_page_size(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse and validate TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::Config(format!(
                "page_size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        Ok(())
    }
}

/// Locate the config file: CLI argument, then environment variable, then
/// the platform config locations. Returns `None` when nothing exists.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_candidates().into_iter().find(|p| p.exists())
}

/// Platform config file locations, most specific first
fn default_config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("medadmin").join("config.toml"));
    }
    if cfg!(unix) {
        candidates.push(PathBuf::from("/etc/medadmin/config.toml"));
    }
    candidates
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This file was named explicitly but does not exist
    Missing(PathBuf),
    /// No file was named or found
    Defaults,
}

/// Load configuration, falling back to defaults when no file is found.
///
/// An explicitly named file that is missing is reported through
/// [`ConfigSource::Missing`] and skipped; a file that exists but is
/// malformed is an error. Nothing is logged here so callers can load the
/// config before logging is initialised.
pub fn load_config(
    cli_arg: Option<&Path>,
    env_var_name: &str,
) -> Result<(TomlConfig, ConfigSource)> {
    let Some(path) = resolve_config_path(cli_arg, env_var_name) else {
        return Ok((TomlConfig::default(), ConfigSource::Defaults));
    };

    if !path.exists() {
        return Ok((TomlConfig::default(), ConfigSource::Missing(path)));
    }

    let config = TomlConfig::load(&path)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok((config, ConfigSource::File(path)))
}

/// Resolve the fixtures file following the standard priority order
pub fn resolve_fixtures_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    config: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.fixtures_path {
        return path.clone();
    }

    default_fixtures_path()
}

/// OS-dependent default location of the fixtures file
pub fn default_fixtures_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("medadmin").join("records.json"))
        .unwrap_or_else(|| PathBuf::from("./medadmin_data/records.json"))
}
