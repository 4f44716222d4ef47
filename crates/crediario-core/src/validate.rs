//! # Per-Step Validators
//!
//! Pure predicate functions over [`Fields`], one per wizard step. Each
//! returns the error map for that step; an empty map is the only thing
//! that unlocks forward navigation.
//!
//! Validation is synchronous and local: no network calls, no side
//! effects. The postal lookup is NOT validation; it is an address
//! convenience handled by the wizard reducer.

use crate::fields::{self, Errors, Fields, ReferencePart};
use crate::wizard::Step;

// =============================================================================
// VALIDATION CONSTANTS
// =============================================================================

/// A CPF carries exactly 11 digits. Check digits are the backend's concern.
pub const CPF_DIGITS: usize = 11;

/// A complete CEP carries exactly 8 digits; this is also the threshold
/// that triggers the postal lookup.
pub const CEP_DIGITS: usize = 8;

/// Minimum digits for a WhatsApp number (DDD + number).
pub const MIN_WHATSAPP_DIGITS: usize = 10;

// =============================================================================
// STEP DISPATCH
// =============================================================================

/// Validate the fields of one wizard step.
#[must_use]
pub fn validate_step(step: Step, form: &Fields) -> Errors {
    match step {
        Step::Personal => validate_personal(form),
        Step::Address => validate_address(form),
        Step::Employment => validate_employment(form),
        Step::References => validate_references(form),
    }
}

// =============================================================================
// STEP 1: PERSONAL DATA
// =============================================================================

fn validate_personal(form: &Fields) -> Errors {
    let mut errors = Errors::new();
    if form.is_blank(fields::NOME) {
        errors.insert(fields::NOME, "Informe o nome completo");
    }
    if form.digits(fields::CPF).len() != CPF_DIGITS {
        errors.insert(fields::CPF, "CPF deve conter 11 dígitos");
    }
    if form.is_blank(fields::ESTADO_CIVIL) {
        errors.insert(fields::ESTADO_CIVIL, "Informe o estado civil");
    }
    if !is_date_pattern(form.trimmed(fields::DATA_NASCIMENTO)) {
        errors.insert(fields::DATA_NASCIMENTO, "Data deve estar no formato DD/MM/AAAA");
    }
    if !is_email_shape(form.trimmed(fields::EMAIL)) {
        errors.insert(fields::EMAIL, "E-mail inválido");
    }
    if form.digits(fields::WHATSAPP).len() < MIN_WHATSAPP_DIGITS {
        errors.insert(fields::WHATSAPP, "WhatsApp deve conter ao menos 10 dígitos (DDD + número)");
    }
    errors
}

// =============================================================================
// STEP 2: ADDRESS
// =============================================================================

fn validate_address(form: &Fields) -> Errors {
    let mut errors = Errors::new();
    if form.digits(fields::CEP).len() != CEP_DIGITS {
        errors.insert(fields::CEP, "CEP deve conter 8 dígitos");
    }
    if form.is_blank(fields::RUA) {
        errors.insert(fields::RUA, "Informe a rua");
    }
    if form.is_blank(fields::BAIRRO) {
        errors.insert(fields::BAIRRO, "Informe o bairro");
    }
    if form.is_blank(fields::CIDADE) {
        errors.insert(fields::CIDADE, "Informe a cidade");
    }
    if form.is_blank(fields::ESTADO) {
        errors.insert(fields::ESTADO, "Informe o estado");
    }
    // `numero` and `complemento` are unconstrained.
    errors
}

// =============================================================================
// STEP 3: EMPLOYMENT / INCOME
// =============================================================================

fn validate_employment(form: &Fields) -> Errors {
    let mut errors = Errors::new();
    if form.is_blank(fields::NOME_EMPRESA) {
        errors.insert(fields::NOME_EMPRESA, "Informe o nome da empresa");
    }
    if form.is_blank(fields::POSSUI_CARTEIRA) {
        errors.insert(fields::POSSUI_CARTEIRA, "Selecione uma opção");
    }
    if form.is_blank(fields::RENDA_MENSAL) {
        errors.insert(fields::RENDA_MENSAL, "Informe a renda mensal");
    }
    if form.is_blank(fields::COMPROVACAO_RENDA) {
        errors.insert(fields::COMPROVACAO_RENDA, "Informe a comprovação de renda");
    }
    errors
}

// =============================================================================
// STEP 4: REFERENCES
// =============================================================================

/// A reference slot with ANY sub-field present must be fully valid;
/// missing sub-fields are flagged individually. At least one slot must be
/// complete overall, else a form-level error is raised under
/// [`fields::REFERENCIAS`].
fn validate_references(form: &Fields) -> Errors {
    let mut errors = Errors::new();
    let mut complete_slots = 0;

    for slot in 1..=fields::REFERENCE_SLOTS {
        let nome_key = fields::reference_field(slot, ReferencePart::Nome);
        let relacao_key = fields::reference_field(slot, ReferencePart::Relacao);
        let whatsapp_key = fields::reference_field(slot, ReferencePart::Whatsapp);

        let nome_ok = !form.is_blank(&nome_key);
        let relacao_ok = !form.is_blank(&relacao_key);
        let whatsapp_ok = form.digits(&whatsapp_key).len() >= MIN_WHATSAPP_DIGITS;

        if nome_ok && relacao_ok && whatsapp_ok {
            complete_slots += 1;
            continue;
        }

        let any_present =
            nome_ok || relacao_ok || !form.is_blank(&whatsapp_key);
        if any_present {
            if !nome_ok {
                errors.insert(nome_key, "Informe o nome da referência");
            }
            if !relacao_ok {
                errors.insert(relacao_key, "Informe a relação com a referência");
            }
            if !whatsapp_ok {
                errors.insert(whatsapp_key, "WhatsApp da referência deve conter ao menos 10 dígitos");
            }
        }
    }

    if complete_slots == 0 {
        errors.insert(fields::REFERENCIAS, "Informe ao menos uma referência completa");
    }
    errors
}

// =============================================================================
// SHAPE CHECKS
// =============================================================================

/// Exact `DD/MM/AAAA` pattern: 10 characters, slashes at positions 2 and
/// 5, digits elsewhere. Calendar plausibility is not checked.
#[must_use]
pub fn is_date_pattern(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    bytes.iter().enumerate().all(|(index, byte)| match index {
        2 | 5 => *byte == b'/',
        _ => byte.is_ascii_digit(),
    })
}

/// Basic `x@y.z` shape: one `@`, non-empty local part, a dotted domain
/// with non-empty components, no whitespace.
#[must_use]
pub fn is_email_shape(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_personal() -> Fields {
        let mut form = Fields::new();
        form.set_text(fields::NOME, "Maria da Silva");
        form.set_text(fields::CPF, "111.444.777-35");
        form.set_text(fields::ESTADO_CIVIL, "solteira");
        form.set_text(fields::DATA_NASCIMENTO, "01/01/1990");
        form.set_text(fields::EMAIL, "maria@example.com");
        form.set_text(fields::WHATSAPP, "(11) 98765-4321");
        form
    }

    #[test]
    fn personal_accepts_valid_fields() {
        let errors = validate_step(Step::Personal, &valid_personal());
        assert!(errors.is_empty());
    }

    #[test]
    fn personal_rejects_empty_nome() {
        let mut form = valid_personal();
        form.set_text(fields::NOME, "   ");
        let errors = validate_step(Step::Personal, &form);
        assert!(errors.get(fields::NOME).is_some());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn personal_rejects_short_cpf() {
        let mut form = valid_personal();
        form.set_text(fields::CPF, "111.444.777-3");
        let errors = validate_step(Step::Personal, &form);
        assert!(errors.get(fields::CPF).is_some());
    }

    #[test]
    fn personal_rejects_wrong_date_separator() {
        let mut form = valid_personal();
        form.set_text(fields::DATA_NASCIMENTO, "2020/01/01");
        let errors = validate_step(Step::Personal, &form);
        assert!(errors.get(fields::DATA_NASCIMENTO).is_some());
    }

    #[test]
    fn address_requires_complete_cep_and_street_data() {
        let mut form = Fields::new();
        form.set_text(fields::CEP, "01310-93");
        let errors = validate_step(Step::Address, &form);
        assert!(errors.get(fields::CEP).is_some());
        assert!(errors.get(fields::RUA).is_some());
        assert!(errors.get(fields::BAIRRO).is_some());
        assert!(errors.get(fields::CIDADE).is_some());
        assert!(errors.get(fields::ESTADO).is_some());
        // optional fields never error
        assert!(errors.get(fields::NUMERO).is_none());
        assert!(errors.get(fields::COMPLEMENTO).is_none());
    }

    #[test]
    fn employment_requires_all_four_fields() {
        let errors = validate_step(Step::Employment, &Fields::new());
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn references_accept_one_complete_slot() {
        let mut form = Fields::new();
        form.set_text("referencia1Nome", "João");
        form.set_text("referencia1Relacao", "irmão");
        form.set_text("referencia1Whatsapp", "(11) 91234-5678");
        let errors = validate_step(Step::References, &form);
        assert!(errors.is_empty());
    }

    #[test]
    fn references_flag_missing_subfields_of_partial_slot_only() {
        let mut form = Fields::new();
        form.set_text("referencia1Nome", "João");
        let errors = validate_step(Step::References, &form);
        assert!(errors.get("referencia1Relacao").is_some());
        assert!(errors.get("referencia1Whatsapp").is_some());
        assert!(errors.get("referencia1Nome").is_none());
        // fully empty slots stay silent
        assert!(errors.get("referencia2Nome").is_none());
        assert!(errors.get("referencia3Nome").is_none());
        // but the form-level error fires: no complete slot yet
        assert!(errors.get(fields::REFERENCIAS).is_some());
    }

    #[test]
    fn references_require_at_least_one_complete_slot() {
        let errors = validate_step(Step::References, &Fields::new());
        assert_eq!(errors.len(), 1);
        assert!(errors.get(fields::REFERENCIAS).is_some());
    }

    #[test]
    fn reference_whatsapp_with_few_digits_is_flagged() {
        let mut form = Fields::new();
        form.set_text("referencia2Nome", "Ana");
        form.set_text("referencia2Relacao", "amiga");
        form.set_text("referencia2Whatsapp", "(11) 9123");
        let errors = validate_step(Step::References, &form);
        assert!(errors.get("referencia2Whatsapp").is_some());
        assert!(errors.get("referencia2Nome").is_none());
    }

    #[test]
    fn date_pattern_shape() {
        assert!(is_date_pattern("01/01/1990"));
        assert!(!is_date_pattern("1/1/1990"));
        assert!(!is_date_pattern("2020/01/01"));
        assert!(!is_date_pattern("01-01-1990"));
        assert!(!is_date_pattern(""));
    }

    #[test]
    fn email_shape() {
        assert!(is_email_shape("a@b.c"));
        assert!(is_email_shape("maria.silva@sub.example.com"));
        assert!(!is_email_shape("a@b"));
        assert!(!is_email_shape("@b.c"));
        assert!(!is_email_shape("a b@c.d"));
        assert!(!is_email_shape("a@@b.c"));
        assert!(!is_email_shape(""));
    }
}
