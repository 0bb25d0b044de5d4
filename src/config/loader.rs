//! Configuration file loading with precedence handling.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Default per-scan key limit.
pub const DEFAULT_COUNT: usize = 20;

/// Default address when none is configured.
pub const DEFAULT_ADDR: &str = "127.0.0.1:6379";

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "REDIS_VIEWER_CONFIG";

/// Environment variable overriding the password.
pub const ENV_PASSWORD: &str = "REDIS_VIEWER_PASSWORD";

/// Environment variable overriding the per-scan key limit.
pub const ENV_COUNT: &str = "REDIS_VIEWER_COUNT";

/// Contents written on first run when no config file exists yet.
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# redis-viewer configuration

# Topology: "client", "sentinel" or "cluster".
mode = "client"

# Store addresses. Sentinel mode lists sentinels, cluster mode lists seed nodes.
addrs = ["127.0.0.1:6379"]

db = 0
# username = ""
# password = ""

# Sentinel master name (required in sentinel mode).
# master_name = "mymaster"

# Maximum number of keys loaded per search.
count = 20
"#;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Failed to write the default config file.
    #[error("Failed to write config file at {path}: {reason}")]
    WriteError {
        /// Path that failed to write.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Sentinel mode was selected without a master name.
    #[error("Sentinel mode requires `master_name`")]
    MissingSentinelMaster,

    /// No store address configured.
    #[error("At least one address is required in `addrs`")]
    NoAddresses,

    /// Per-scan key limit must be positive.
    #[error("`count` must be at least 1")]
    InvalidCount,
}

/// Store topology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// A single instance.
    #[default]
    Client,
    /// Master discovered through sentinels.
    Sentinel,
    /// Cluster reached through seed nodes.
    Cluster,
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/redis-viewer/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Store topology.
    #[serde(default)]
    pub mode: Option<StoreMode>,

    /// `host:port` addresses.
    #[serde(default)]
    pub addrs: Option<Vec<String>>,

    /// Logical database index (standalone and sentinel only).
    #[serde(default)]
    pub db: Option<i64>,

    /// ACL username.
    #[serde(default)]
    pub username: Option<String>,

    /// Password.
    #[serde(default)]
    pub password: Option<String>,

    /// Sentinel master name.
    #[serde(default)]
    pub master_name: Option<String>,

    /// Maximum number of keys loaded per search.
    #[serde(default)]
    pub count: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Store topology.
    pub mode: StoreMode,
    /// `host:port` addresses.
    pub addrs: Vec<String>,
    /// Logical database index.
    pub db: i64,
    /// ACL username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Sentinel master name.
    pub master_name: Option<String>,
    /// Maximum number of keys loaded per search.
    pub count: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            mode: StoreMode::Client,
            addrs: vec![DEFAULT_ADDR.to_string()],
            db: 0,
            username: None,
            password: None,
            master_name: None,
            count: DEFAULT_COUNT,
            log_file_path: default_log_path(),
        }
    }
}

// Password stays out of the startup log line.
impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("mode", &self.mode)
            .field("addrs", &self.addrs)
            .field("db", &self.db)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("master_name", &self.master_name)
            .field("count", &self.count)
            .field("log_file_path", &self.log_file_path)
            .finish()
    }
}

/// CLI flags that override configuration values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--mode`
    pub mode: Option<StoreMode>,
    /// `--addr` (repeatable); empty means "not given".
    pub addrs: Vec<String>,
    /// `--db`
    pub db: Option<i64>,
    /// `--count`
    pub count: Option<usize>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/redis-viewer/redis-viewer.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("redis-viewer").join("redis-viewer.log")
    } else {
        PathBuf::from("redis-viewer.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/redis-viewer/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("redis-viewer").join("config.toml"))
}

/// Write the commented default config file, creating its directory.
///
/// # Errors
///
/// Returns `ConfigError::WriteError` if the directory or file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |e: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `REDIS_VIEWER_CONFIG` environment variable
/// 3. Default path `~/.config/redis-viewer/config.toml`
///
/// Missing config files are NOT errors - defaults are used. When the default path
/// is used and nothing exists there yet, a commented default file is written so
/// the user has something to edit; failing to write it only logs a warning.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        if !default_path.exists() {
            match write_default_config(&default_path) {
                Ok(()) => info!(path = ?default_path, "Wrote default config file"),
                Err(e) => warn!(error = %e, "Could not write default config file"),
            }
        }
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        mode: config.mode.unwrap_or(defaults.mode),
        addrs: config.addrs.unwrap_or(defaults.addrs),
        db: config.db.unwrap_or(defaults.db),
        username: config.username.or(defaults.username),
        password: config.password.or(defaults.password),
        master_name: config.master_name.or(defaults.master_name),
        count: config.count.unwrap_or(defaults.count),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `REDIS_VIEWER_PASSWORD`: Override password
/// - `REDIS_VIEWER_COUNT`: Override per-scan key limit (ignored if not a number)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(password) = std::env::var(ENV_PASSWORD) {
        config.password = Some(password);
    }

    if let Ok(raw) = std::env::var(ENV_COUNT) {
        match raw.parse::<usize>() {
            Ok(count) => config.count = count,
            Err(_) => warn!(value = %raw, "Ignoring non-numeric {}", ENV_COUNT),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(mode) = overrides.mode {
        config.mode = mode;
    }

    if !overrides.addrs.is_empty() {
        config.addrs = overrides.addrs;
    }

    if let Some(db) = overrides.db {
        config.db = db;
    }

    if let Some(count) = overrides.count {
        config.count = count;
    }

    config
}

/// Check cross-field constraints of a fully resolved config.
///
/// # Errors
///
/// - `NoAddresses` when `addrs` is empty
/// - `MissingSentinelMaster` in sentinel mode without `master_name`
/// - `InvalidCount` when `count` is zero
pub fn validate(config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if config.addrs.is_empty() {
        return Err(ConfigError::NoAddresses);
    }

    if config.mode == StoreMode::Sentinel
        && config.master_name.as_deref().is_none_or(str::is_empty)
    {
        return Err(ConfigError::MissingSentinelMaster);
    }

    if config.count == 0 {
        return Err(ConfigError::InvalidCount);
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
