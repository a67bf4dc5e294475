//! Configuration loading and root folder resolution
//!
//! Priority order for every setting:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The first two tiers are merged by the binary's argument parser; this
//! module resolves the remaining tiers.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "gigbook.db";

/// Default HTTP bind address
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the config file at `path`, or at the platform default location
    /// when no path is given. A missing file yields the defaults; a file that
    /// exists but cannot be parsed is an error so the caller can report it.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

/// Fully resolved server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub root_folder: PathBuf,
    pub bind: String,
    pub port: u16,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

/// Settings already merged from CLI and environment (highest priority)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root_folder: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Combine overrides with the TOML tier and compiled defaults
    pub fn resolve(overrides: Overrides, file: TomlConfig) -> Self {
        Self {
            root_folder: overrides
                .root_folder
                .or(file.root_folder)
                .unwrap_or_else(default_root_folder),
            bind: overrides
                .bind
                .or(file.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_file: overrides.log_file.or(file.log_file),
        }
    }

    /// Path of the SQLite database inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    /// `host:port` string for the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Default configuration file path for the platform
///
/// `~/.config/gigbook/config.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gigbook").join("config.toml"))
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("gigbook"))
        .unwrap_or_else(|| PathBuf::from("./gigbook_data"))
}
