//! Configuration management.
//!
//! Host and token resolve with flag > environment > config file precedence.
//! The flag/environment half is handled by clap's `env` attribute in the
//! binary; this module supplies the file-backed fallback.

use crate::{Error, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;

/// Runtime configuration for geniectl.
#[derive(Debug, Clone, Default)]
pub struct GenieConfig {
    /// Workspace base URL (e.g. `https://adb-123.4.azuredatabricks.net`).
    pub host: Option<String>,
    /// API bearer token.
    pub token: Option<SecretString>,
    /// HTTP client settings.
    pub http: HttpSettings,
}

/// HTTP settings from the config file's `[http]` table.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Workspace base URL.
    pub host: Option<String>,
    /// API bearer token.
    pub token: Option<String>,
    /// HTTP settings.
    pub http: Option<HttpSettings>,
}

impl GenieConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/geniectl/` on macOS)
    /// 2. XDG config dir (`~/.config/geniectl/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("geniectl").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("geniectl")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `GenieConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        Self {
            host: file.host,
            token: file.token.map(SecretString::from),
            http: file.http.unwrap_or_default(),
        }
    }

    /// Resolves the workspace host, preferring the supplied flag/environment
    /// value over the config file.
    ///
    /// # Errors
    ///
    /// Returns an error when no host is configured anywhere.
    pub fn resolve_host(&self, flag: Option<String>) -> Result<String> {
        flag.or_else(|| self.host.clone()).ok_or_else(|| {
            Error::InvalidInput(
                "no Databricks host configured; pass --host, set DATABRICKS_HOST, \
                 or add `host` to the config file"
                    .to_string(),
            )
        })
    }

    /// Resolves the API token, preferring the supplied flag/environment
    /// value over the config file.
    ///
    /// # Errors
    ///
    /// Returns an error when no token is configured anywhere.
    pub fn resolve_token(&self, flag: Option<String>) -> Result<SecretString> {
        flag.map(SecretString::from)
            .or_else(|| self.token.clone())
            .ok_or_else(|| {
                Error::InvalidInput(
                    "no Databricks token configured; pass --token, set DATABRICKS_TOKEN, \
                     or add `token` to the config file"
                        .to_string(),
                )
            })
    }
}
