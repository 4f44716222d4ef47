//! # Field Schema
//!
//! Field names and value storage for the client-intake form.
//!
//! Field names double as submission wire names, so the constants here use
//! the backend's camelCase spelling. The three reference slots are
//! addressed through [`reference_field`] (names carry the 1-based slot).
//!
//! ## Determinism
//!
//! [`Fields`] and [`Errors`] wrap `BTreeMap` so iteration order is stable;
//! validation output and rendered error lists never depend on insertion
//! order.

use crate::mask;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// FIELD NAMES (personal data)
// =============================================================================

pub const NOME: &str = "nome";
pub const CPF: &str = "cpf";
/// Optional on the intake form; masked but never validated.
pub const RG: &str = "rg";
pub const ESTADO_CIVIL: &str = "estadoCivil";
pub const DATA_NASCIMENTO: &str = "dataNascimento";
pub const EMAIL: &str = "email";
pub const WHATSAPP: &str = "whatsapp";

// =============================================================================
// FIELD NAMES (address)
// =============================================================================

pub const CEP: &str = "cep";
pub const RUA: &str = "rua";
pub const NUMERO: &str = "numero";
pub const COMPLEMENTO: &str = "complemento";
pub const BAIRRO: &str = "bairro";
pub const CIDADE: &str = "cidade";
pub const ESTADO: &str = "estado";

// =============================================================================
// FIELD NAMES (employment)
// =============================================================================

pub const NOME_EMPRESA: &str = "nomeEmpresa";
pub const POSSUI_CARTEIRA: &str = "possuiCarteiraAssinadaOuAposentado";
pub const RENDA_MENSAL: &str = "rendaMensal";
pub const COMPROVACAO_RENDA: &str = "comprovacaoRenda";

// =============================================================================
// FIELD NAMES (references)
// =============================================================================

/// Key used for the form-level reference error ("at least one complete
/// reference"), which belongs to no single input.
pub const REFERENCIAS: &str = "referencias";

/// Number of reference slots on the intake form.
pub const REFERENCE_SLOTS: usize = 3;

/// Sub-fields of one reference slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferencePart {
    Nome,
    Relacao,
    Whatsapp,
    /// Checkbox: whether the client personally knows the reference.
    /// UI-only; not validated and not submitted.
    Conhece,
}

impl ReferencePart {
    fn suffix(self) -> &'static str {
        match self {
            Self::Nome => "Nome",
            Self::Relacao => "Relacao",
            Self::Whatsapp => "Whatsapp",
            Self::Conhece => "Conhece",
        }
    }
}

/// Field name for one sub-field of a reference slot (1-based).
///
/// `reference_field(2, ReferencePart::Nome)` is `"referencia2Nome"`.
#[must_use]
pub fn reference_field(slot: usize, part: ReferencePart) -> String {
    format!("referencia{}{}", slot, part.suffix())
}

/// Whether a field name addresses a reference WhatsApp number.
#[must_use]
pub fn is_reference_whatsapp(name: &str) -> bool {
    name.starts_with("referencia") && name.ends_with("Whatsapp")
}

// =============================================================================
// FIELD VALUE
// =============================================================================

/// A single form value: free text, or a checkbox-like flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Build a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text content; flags read as empty (they never enter text
    /// validation).
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(value) => value,
            Self::Flag(_) => "",
        }
    }

    /// Flag content; text reads as unset.
    #[must_use]
    pub fn as_flag(&self) -> bool {
        matches!(self, Self::Flag(true))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// The form's field map. Keys follow the fixed schema above; absent keys
/// read as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fields(BTreeMap<String, FieldValue>);

impl Fields {
    /// Create an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    /// Store a text value.
    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, FieldValue::Text(value.into()));
    }

    /// Raw value for a field, if ever set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text content of a field; absent fields and flags read as `""`.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        self.0.get(name).map_or("", FieldValue::as_text)
    }

    /// Trimmed text content of a field.
    #[must_use]
    pub fn trimmed(&self, name: &str) -> &str {
        self.text(name).trim()
    }

    /// Whether a field is empty after trimming.
    #[must_use]
    pub fn is_blank(&self, name: &str) -> bool {
        self.trimmed(name).is_empty()
    }

    /// Digits-only view of a field (submission normalization).
    #[must_use]
    pub fn digits(&self, name: &str) -> String {
        mask::strip_digits(self.text(name))
    }

    /// Flag content of a field; absent fields and text read as unset.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(FieldValue::as_flag)
    }

    /// Number of fields ever set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field was ever set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Validation errors keyed by field name, message ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Errors(BTreeMap<String, String>);

impl Errors {
    /// Create an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field, replacing any previous message.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Clear the error for one field (the user edited it).
    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Message for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether validation passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields in error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(field, message)` pairs in stable (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
