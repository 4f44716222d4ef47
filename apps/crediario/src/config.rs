//! # Configuration
//!
//! TOML configuration with environment overrides:
//!
//! - `CREDIARIO_API_URL` - admin backend base URL
//! - `CREDIARIO_API_KEY` - optional Bearer token for the backend
//! - `CREDIARIO_CEP_URL` - postal-code service base URL
//!
//! A missing config file yields the defaults; a malformed one is an
//! error. Environment variables win over the file.

use crediario_core::CrediarioError;
use serde::Deserialize;
use std::path::Path;

/// Config file read from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "crediario.toml";

/// Default admin backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3333";

/// Default postal-code service.
pub const DEFAULT_CEP_URL: &str = "https://viacep.com.br/ws";

// =============================================================================
// CONFIG TABLES
// =============================================================================

/// `[backend]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the admin REST backend.
    pub url: String,
    /// Optional Bearer token.
    pub api_key: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { url: DEFAULT_BACKEND_URL.to_string(), api_key: None }
    }
}

/// `[cep]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CepConfig {
    /// Base URL of the postal-code service.
    pub url: String,
}

impl Default for CepConfig {
    fn default() -> Self {
        Self { url: DEFAULT_CEP_URL.to_string() }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub cep: CepConfig,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(raw: &str) -> Result<Self, CrediarioError> {
        toml::from_str(raw).map_err(|e| CrediarioError::ConfigError(e.to_string()))
    }

    /// Load configuration from `path` (or the default file, or pure
    /// defaults when neither exists), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, CrediarioError> {
        let mut config = match path {
            Some(explicit) => {
                let raw = std::fs::read_to_string(explicit).map_err(|e| {
                    CrediarioError::IoError(format!(
                        "Não foi possível ler '{}': {}",
                        explicit.display(),
                        e
                    ))
                })?;
                Self::from_toml(&raw)?
            }
            None => match std::fs::read_to_string(DEFAULT_CONFIG_FILE) {
                Ok(raw) => Self::from_toml(&raw)?,
                Err(_) => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Environment variables win over file values.
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("CREDIARIO_API_URL") {
            self.backend.url = url;
        }
        if let Ok(key) = std::env::var("CREDIARIO_API_KEY") {
            self.backend.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("CREDIARIO_CEP_URL") {
            self.cep.url = url;
        }
    }
}
