//! # Submission Payload
//!
//! Assembles the client-creation request from the wizard's fields.
//!
//! Wire names are the backend's camelCase spelling. Transformations on
//! assembly: the birth date is reordered from `DD/MM/AAAA` to
//! `YYYY-MM-DD`, every identifier/phone field is stripped to digits, the
//! monthly income keeps its decimal comma normalized to a dot (as a
//! string - this workspace denies float arithmetic), and the yes/no
//! employment answer is mapped to one of the two occupation tokens.

use crate::fields::{self, Fields, ReferencePart};
use crate::types::CrediarioError;
use crate::validate;
use serde::{Deserialize, Serialize};

// =============================================================================
// OCCUPATION TOKENS
// =============================================================================

/// `naturezaOcupacao` when the client has a signed work card or is
/// retired.
pub const OCUPACAO_COM_CARTEIRA: &str = "com_carteira_ou_aposentado";

/// `naturezaOcupacao` for everyone else.
pub const OCUPACAO_AUTONOMO: &str = "autonomo";

// =============================================================================
// PAYLOAD
// =============================================================================

/// Body of `POST /clientes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    pub nome: String,
    /// 11 digits, no punctuation.
    pub cpf: String,
    pub estado_civil: String,
    /// `YYYY-MM-DD`.
    pub data_nascimento: String,
    pub email: String,
    /// Digits only.
    pub whatsapp: String,
    /// 8 digits, no punctuation.
    pub cep: String,
    pub rua: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub nome_empresa: String,
    /// Decimal string, dot separator.
    pub renda_mensal: String,
    /// One of [`OCUPACAO_COM_CARTEIRA`] / [`OCUPACAO_AUTONOMO`].
    pub natureza_ocupacao: String,
    pub comprovacao_renda: String,
    pub referencia1_nome: String,
    pub referencia1_relacao: String,
    /// Digits only.
    pub referencia1_whatsapp: String,
    pub referencia2_nome: String,
    pub referencia2_relacao: String,
    pub referencia2_whatsapp: String,
    pub referencia3_nome: String,
    pub referencia3_relacao: String,
    pub referencia3_whatsapp: String,
}

impl ClientPayload {
    /// Assemble the payload from the form's fields.
    ///
    /// The wizard only calls this after step-4 validation passes, so the
    /// required-field and date errors here are a safety net, not a second
    /// validation layer.
    pub fn from_fields(form: &Fields) -> Result<Self, CrediarioError> {
        Ok(Self {
            nome: required_trimmed(form, fields::NOME)?,
            cpf: form.digits(fields::CPF),
            estado_civil: required_trimmed(form, fields::ESTADO_CIVIL)?,
            data_nascimento: iso_date(form.trimmed(fields::DATA_NASCIMENTO))?,
            email: required_trimmed(form, fields::EMAIL)?,
            whatsapp: form.digits(fields::WHATSAPP),
            cep: form.digits(fields::CEP),
            rua: form.trimmed(fields::RUA).to_string(),
            numero: form.trimmed(fields::NUMERO).to_string(),
            complemento: form.trimmed(fields::COMPLEMENTO).to_string(),
            bairro: form.trimmed(fields::BAIRRO).to_string(),
            cidade: form.trimmed(fields::CIDADE).to_string(),
            estado: form.trimmed(fields::ESTADO).to_string(),
            nome_empresa: required_trimmed(form, fields::NOME_EMPRESA)?,
            renda_mensal: normalize_decimal(form.trimmed(fields::RENDA_MENSAL)),
            natureza_ocupacao: occupation_token(form.trimmed(fields::POSSUI_CARTEIRA)),
            comprovacao_renda: required_trimmed(form, fields::COMPROVACAO_RENDA)?,
            referencia1_nome: reference_text(form, 1, ReferencePart::Nome),
            referencia1_relacao: reference_text(form, 1, ReferencePart::Relacao),
            referencia1_whatsapp: reference_digits(form, 1),
            referencia2_nome: reference_text(form, 2, ReferencePart::Nome),
            referencia2_relacao: reference_text(form, 2, ReferencePart::Relacao),
            referencia2_whatsapp: reference_digits(form, 2),
            referencia3_nome: reference_text(form, 3, ReferencePart::Nome),
            referencia3_relacao: reference_text(form, 3, ReferencePart::Relacao),
            referencia3_whatsapp: reference_digits(form, 3),
        })
    }
}

// =============================================================================
// TRANSFORMS
// =============================================================================

fn required_trimmed(form: &Fields, name: &str) -> Result<String, CrediarioError> {
    let value = form.trimmed(name);
    if value.is_empty() {
        return Err(CrediarioError::MissingField(name.to_string()));
    }
    Ok(value.to_string())
}

/// Reorder `DD/MM/AAAA` into `YYYY-MM-DD`.
pub fn iso_date(br_date: &str) -> Result<String, CrediarioError> {
    if !validate::is_date_pattern(br_date) {
        return Err(CrediarioError::InvalidDate(br_date.to_string()));
    }
    // Pattern check above guarantees ASCII and the slash positions.
    let day = &br_date[0..2];
    let month = &br_date[3..5];
    let year = &br_date[6..10];
    Ok(format!("{year}-{month}-{day}"))
}

/// Normalize a Brazilian decimal: when a decimal comma is present, drop
/// thousands dots and turn the comma into a dot. Values already using a
/// dot pass through untouched.
#[must_use]
pub fn normalize_decimal(value: &str) -> String {
    if value.contains(',') {
        value
            .chars()
            .filter(|c| *c != '.')
            .map(|c| if c == ',' { '.' } else { c })
            .collect()
    } else {
        value.to_string()
    }
}

fn occupation_token(answer: &str) -> String {
    if answer.eq_ignore_ascii_case("sim") {
        OCUPACAO_COM_CARTEIRA.to_string()
    } else {
        OCUPACAO_AUTONOMO.to_string()
    }
}

fn reference_text(form: &Fields, slot: usize, part: ReferencePart) -> String {
    form.trimmed(&fields::reference_field(slot, part)).to_string()
}

fn reference_digits(form: &Fields, slot: usize) -> String {
    form.digits(&fields::reference_field(slot, ReferencePart::Whatsapp))
}

// =============================================================================
// TESTS
// =============================================================================
