//! # Configuration
//!
//! Layered settings, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. A TOML file: `--config <path>`, else `./nomad-explorer.toml` if present
//! 3. Environment: `NOMAD_URL`, `NOMAD_TIMEOUT_SECS`, `NOMAD_HOST`, `NOMAD_PORT`
//! 4. CLI flags (applied by the caller)
//!
//! ```toml
//! [nomad]
//! base_url = "https://nomad-lab.eu/prod/rae/api/v1"
//! timeout_secs = 30
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! ```

use nomad_core::NomadError;
use nomad_core::primitives::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "nomad-explorer.toml";

/// Upstream API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NomadConfig {
    pub base_url: String,
    /// Whole-request timeout. Unset keeps the transport default.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for NomadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: format!("nomad-explorer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NomadConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub nomad: NomadConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, NomadError> {
        let mut config: Self =
            toml::from_str(text).map_err(|e| NomadError::ConfigError(e.to_string()))?;
        config.normalize();
        Ok(config)
    }

    /// Read the explicit file, or the default file if it exists, or nothing.
    pub fn load(path: Option<&Path>) -> Result<Self, NomadError> {
        let path = match path {
            Some(p) => p,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(path).map_err(|e| {
            NomadError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Apply `NOMAD_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `NOMAD_*` overrides from an arbitrary lookup.
    ///
    /// Empty values are ignored; unparseable numbers are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("NOMAD_URL") {
            self.nomad.base_url = url;
        }
        if let Some(raw) = get("NOMAD_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.nomad.timeout_secs = Some(secs),
                Err(e) => tracing::warn!("Ignoring NOMAD_TIMEOUT_SECS='{}': {}", raw, e),
            }
        }
        if let Some(host) = get("NOMAD_HOST") {
            self.server.host = host;
        }
        if let Some(raw) = get("NOMAD_PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("Ignoring NOMAD_PORT='{}': {}", raw, e),
            }
        }
        self.normalize();
    }

    /// Reject settings that would make every lookup fail.
    pub fn validate(&self) -> Result<(), NomadError> {
        if self.nomad.timeout_secs == Some(0) {
            return Err(NomadError::ConfigError(
                "timeout_secs must be at least 1; leave it unset for the transport default"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Strip a trailing `/` from the base URL.
    pub fn normalize(&mut self) {
        let trimmed = self.nomad.base_url.trim().trim_end_matches('/');
        self.nomad.base_url = trimmed.to_string();
    }
}

// =============================================================================
// TESTS
// =============================================================================
