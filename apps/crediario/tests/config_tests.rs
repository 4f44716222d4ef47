//! Integration tests for configuration loading.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use crediario::config::{AppConfig, DEFAULT_BACKEND_URL, DEFAULT_CEP_URL};
use std::io::Write;
use std::sync::Mutex;

/// Mutex to serialize env tests since they modify process-wide variables.
static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: [&str; 3] = ["CREDIARIO_API_URL", "CREDIARIO_API_KEY", "CREDIARIO_CEP_URL"];

/// Guard that clears the override variables when the test ends.
struct EnvGuard {
    _guard: std::sync::MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn acquire() -> Self {
        let guard = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        Self { _guard: guard }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_env();
    }
}

fn clear_env() {
    for var in ENV_VARS {
        // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no
        // concurrent env access.
        unsafe { std::env::remove_var(var) };
    }
}

// =============================================================================
// DEFAULTS
// =============================================================================

#[test]
fn default_config_points_at_local_backend() {
    let _env = EnvGuard::acquire();
    let config = AppConfig::default();
    assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
    assert!(config.backend.api_key.is_none());
    assert_eq!(config.cep.url, DEFAULT_CEP_URL);
}

#[test]
fn explicitly_named_missing_file_is_an_error() {
    let _env = EnvGuard::acquire();
    assert!(AppConfig::load(Some(std::path::Path::new("/nonexistent/crediario.toml"))).is_err());
}

// =============================================================================
// TOML PARSING
// =============================================================================

#[test]
fn parses_full_toml() {
    let raw = r#"
        [backend]
        url = "https://api.exemplo.com.br"
        api_key = "chave-secreta"

        [cep]
        url = "https://cep.exemplo.com.br/ws"
    "#;
    let config = AppConfig::from_toml(raw).unwrap();
    assert_eq!(config.backend.url, "https://api.exemplo.com.br");
    assert_eq!(config.backend.api_key.as_deref(), Some("chave-secreta"));
    assert_eq!(config.cep.url, "https://cep.exemplo.com.br/ws");
}

#[test]
fn partial_toml_keeps_defaults_for_the_rest() {
    let raw = r#"
        [backend]
        url = "http://10.0.0.5:3333"
    "#;
    let config = AppConfig::from_toml(raw).unwrap();
    assert_eq!(config.backend.url, "http://10.0.0.5:3333");
    assert!(config.backend.api_key.is_none());
    assert_eq!(config.cep.url, DEFAULT_CEP_URL);
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(AppConfig::from_toml("backend = [not toml").is_err());
}

#[test]
fn loads_from_explicit_file() {
    let _env = EnvGuard::acquire();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[backend]").unwrap();
    writeln!(file, "url = \"http://arquivo:3333\"").unwrap();

    let config = AppConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.backend.url, "http://arquivo:3333");
}

// =============================================================================
// ENVIRONMENT OVERRIDES
// =============================================================================

#[test]
fn env_vars_override_file_values() {
    let _env = EnvGuard::acquire();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[backend]").unwrap();
    writeln!(file, "url = \"http://arquivo:3333\"").unwrap();

    // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no
    // concurrent env access.
    unsafe {
        std::env::set_var("CREDIARIO_API_URL", "http://ambiente:4444");
        std::env::set_var("CREDIARIO_API_KEY", "chave-do-ambiente");
    }

    let config = AppConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.backend.url, "http://ambiente:4444");
    assert_eq!(config.backend.api_key.as_deref(), Some("chave-do-ambiente"));
    // untouched by env: keeps the default
    assert_eq!(config.cep.url, DEFAULT_CEP_URL);
}
