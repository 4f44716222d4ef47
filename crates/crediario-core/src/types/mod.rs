//! # Core Type Definitions
//!
//! Shared types for the Crediário intake engine:
//! - Postal-lookup result ([`LookupAddress`])
//! - Error types ([`CrediarioError`])
//!
//! User-facing messages are pt-BR, matching the console's language; the
//! code itself stays in English.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// POSTAL LOOKUP RESULT
// =============================================================================

/// Address record returned by the postal-code service for a complete CEP.
///
/// The service echoes the formatted code back; the wizard only consumes the
/// four address components, overwriting `rua`, `bairro`, `cidade` and
/// `estado` on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupAddress {
    /// Echoed postal code, formatted (`00000-000`).
    pub cep: String,
    /// Street name.
    pub logradouro: String,
    /// District.
    pub bairro: String,
    /// City.
    pub cidade: String,
    /// State abbreviation.
    pub estado: String,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by the Crediário engine and console.
///
/// - Validation problems never raise these; they live in the wizard's
///   error map and only block forward navigation.
/// - No error here is fatal to a form session; entered data survives.
#[derive(Debug, Error)]
pub enum CrediarioError {
    /// A required field was absent when assembling the submission payload.
    #[error("Campo obrigatório ausente: {0}")]
    MissingField(String),

    /// A date field did not match the `DD/MM/AAAA` pattern.
    #[error("Data inválida: {0}")]
    InvalidDate(String),

    /// Command-line input could not be interpreted.
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    /// The configuration file could not be parsed.
    #[error("Configuração inválida: {0}")]
    ConfigError(String),

    /// An I/O error occurred (console or config file).
    #[error("Erro de E/S: {0}")]
    IoError(String),

    /// The backend rejected a request and supplied a message; surfaced
    /// verbatim.
    #[error("{0}")]
    Backend(String),

    /// The backend or the postal service could not be reached or answered
    /// with a transport-level failure.
    #[error("Falha de comunicação: {0}")]
    Transport(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_is_surfaced_verbatim() {
        let error = CrediarioError::Backend("CPF já cadastrado".to_string());
        assert_eq!(error.to_string(), "CPF já cadastrado");
    }

    #[test]
    fn transport_error_carries_context() {
        let error = CrediarioError::Transport("timeout".to_string());
        assert_eq!(error.to_string(), "Falha de comunicação: timeout");
    }
}
