//! # Client-Intake Wizard
//!
//! A 4-step linear state machine driving the client registration form.
//!
//! All state mutation goes through [`WizardState::apply`]: the shell (a
//! terminal today, possibly another surface tomorrow) feeds it
//! [`WizardEvent`]s and executes the [`WizardEffect`]s it returns. The
//! reducer itself is pure Rust with no async and no network access; the
//! postal lookup and the final submission are effects, and their results
//! re-enter as events.
//!
//! ## Navigation contract
//!
//! Forward navigation is gated: `Advanced` runs the current step's
//! validator and only moves on when it returns zero errors. Backward
//! navigation never validates; retreating from step 1 leaves the wizard.
//!
//! ## Postal lookup sequencing
//!
//! Each dispatched lookup carries a monotonic request id. A resolution
//! whose id is not the most recently issued is discarded, so a slow
//! response can never overwrite an address the user has since corrected.

use crate::fields::{self, Errors, FieldValue, Fields};
use crate::mask::{self, MaskKind};
use crate::payload::ClientPayload;
use crate::types::LookupAddress;
use crate::validate::{self, CEP_DIGITS};
use serde::{Deserialize, Serialize};

// =============================================================================
// STEP
// =============================================================================

/// The four wizard steps, in order. No step is ever skipped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Step {
    /// Step 1: personal data.
    #[default]
    Personal,
    /// Step 2: address, auto-filled from the postal lookup.
    Address,
    /// Step 3: employment and income.
    Employment,
    /// Step 4: contact references and final submit.
    References,
}

impl Step {
    /// 1-based step number, as displayed to the user.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Step::Personal => 1,
            Step::Address => 2,
            Step::Employment => 3,
            Step::References => 4,
        }
    }

    /// Step title, as displayed to the user.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Step::Personal => "Dados pessoais",
            Step::Address => "Endereço",
            Step::Employment => "Dados profissionais",
            Step::References => "Referências",
        }
    }

    /// The following step, if any.
    #[must_use]
    pub const fn next(self) -> Option<Step> {
        match self {
            Step::Personal => Some(Step::Address),
            Step::Address => Some(Step::Employment),
            Step::Employment => Some(Step::References),
            Step::References => None,
        }
    }

    /// The preceding step, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Step> {
        match self {
            Step::Personal => None,
            Step::Address => Some(Step::Personal),
            Step::Employment => Some(Step::Address),
            Step::References => Some(Step::Employment),
        }
    }

    /// Whether retreating from this step exits the wizard.
    #[must_use]
    pub const fn is_first(self) -> bool {
        matches!(self, Step::Personal)
    }

    /// Whether advancing from this step submits instead of navigating.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Step::References)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Passo {}: {}", self.number(), self.title())
    }
}

// =============================================================================
// EVENTS / EFFECTS
// =============================================================================

/// Result of the final submission, fed back into the wizard by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// The backend accepted the new client.
    Accepted,
    /// The backend rejected the submission; `message` carries its error
    /// verbatim when it supplied one.
    Rejected { message: Option<String> },
}

/// Everything that can happen to the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardEvent {
    /// The user edited one field. Text values are masked before storage.
    FieldEdited { name: String, value: FieldValue },
    /// The user asked to move forward (or, on the last step, to submit).
    Advanced,
    /// The user asked to move back. Never validates.
    Retreated,
    /// A postal lookup resolved. `None` covers both "not found" and
    /// transport failure; the wizard treats them identically.
    AddressResolved {
        request_id: u64,
        address: Option<LookupAddress>,
    },
    /// The submission effect completed.
    SubmitFinished { outcome: SubmitOutcome },
    /// The transient submission notice was shown and dismissed.
    NoticeDismissed,
}

/// Work the shell must perform on the wizard's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardEffect {
    /// Query the postal service for an 8-digit CEP; feed the result back
    /// as [`WizardEvent::AddressResolved`] with the same `request_id`.
    LookupCep { request_id: u64, cep: String },
    /// Post the assembled payload to the backend; feed the result back as
    /// [`WizardEvent::SubmitFinished`].
    SubmitClient { payload: ClientPayload },
    /// Leave the wizard (back from step 1, or after a successful submit).
    ExitWizard,
}

/// Fallback notice when the backend rejects a submission without a
/// message of its own.
pub const GENERIC_SUBMIT_ERROR: &str = "Não foi possível concluir o cadastro. Tente novamente.";

// =============================================================================
// WIZARD STATE
// =============================================================================

/// The intake form session. One instance per form; reset on successful
/// submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    step: Step,
    fields: Fields,
    errors: Errors,
    /// Transient submission notice (backend message or generic fallback).
    notice: Option<String>,
    /// Id of the most recently issued postal lookup; 0 = none yet.
    lookup_seq: u64,
}

impl WizardState {
    /// Start a fresh session at step 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Current field values.
    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Current validation errors.
    #[must_use]
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Pending submission notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Apply one event and return the effects the shell must execute.
    pub fn apply(&mut self, event: WizardEvent) -> Vec<WizardEffect> {
        match event {
            WizardEvent::FieldEdited { name, value } => self.edit_field(&name, value),
            WizardEvent::Advanced => self.advance(),
            WizardEvent::Retreated => self.retreat(),
            WizardEvent::AddressResolved { request_id, address } => {
                self.resolve_address(request_id, address);
                Vec::new()
            }
            WizardEvent::SubmitFinished { outcome } => self.finish_submit(outcome),
            WizardEvent::NoticeDismissed => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    // =========================================================================
    // FIELD EDITING
    // =========================================================================

    fn edit_field(&mut self, name: &str, value: FieldValue) -> Vec<WizardEffect> {
        let stored = match value {
            FieldValue::Text(raw) => match mask_for_field(name) {
                Some(kind) => FieldValue::Text(mask::apply_mask(&raw, kind)),
                None => FieldValue::Text(raw),
            },
            flag @ FieldValue::Flag(_) => flag,
        };

        let previous_cep_digits =
            if name == fields::CEP { Some(self.fields.digits(fields::CEP)) } else { None };

        self.fields.set(name, stored);
        self.errors.remove(name);

        match previous_cep_digits {
            Some(previous) => self.after_cep_edit(&previous),
            None => Vec::new(),
        }
    }

    /// Postal-lookup trigger and the stale-address guard.
    ///
    /// Completing the CEP (or replacing a complete one wholesale, e.g. by
    /// paste) dispatches a lookup. Dropping below 8 digits after having
    /// been complete wipes the four dependent fields, so a stale address
    /// never survives a CEP edit.
    fn after_cep_edit(&mut self, previous_digits: &str) -> Vec<WizardEffect> {
        let current = self.fields.digits(fields::CEP);

        if current.len() == CEP_DIGITS && current != previous_digits {
            self.lookup_seq = self.lookup_seq.saturating_add(1);
            return vec![WizardEffect::LookupCep {
                request_id: self.lookup_seq,
                cep: current,
            }];
        }

        if current.len() < CEP_DIGITS && previous_digits.len() == CEP_DIGITS {
            for key in [fields::RUA, fields::BAIRRO, fields::CIDADE, fields::ESTADO] {
                self.fields.set_text(key, "");
            }
        }
        Vec::new()
    }

    fn resolve_address(&mut self, request_id: u64, address: Option<LookupAddress>) {
        if request_id != self.lookup_seq {
            // A newer lookup was issued since; this response is stale.
            return;
        }
        match address {
            Some(found) => {
                self.fields.set_text(fields::RUA, found.logradouro);
                self.fields.set_text(fields::BAIRRO, found.bairro);
                self.fields.set_text(fields::CIDADE, found.cidade);
                self.fields.set_text(fields::ESTADO, found.estado);
                self.errors.remove(fields::CEP);
            }
            None => {
                // Keep whatever address data is already on the form.
                self.errors.insert(fields::CEP, "CEP não encontrado");
            }
        }
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    fn advance(&mut self) -> Vec<WizardEffect> {
        self.errors = validate::validate_step(self.step, &self.fields);
        if !self.errors.is_empty() {
            return Vec::new();
        }

        if self.step.is_terminal() {
            return match ClientPayload::from_fields(&self.fields) {
                Ok(payload) => vec![WizardEffect::SubmitClient { payload }],
                Err(error) => {
                    self.notice = Some(error.to_string());
                    Vec::new()
                }
            };
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Vec::new()
    }

    fn retreat(&mut self) -> Vec<WizardEffect> {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                Vec::new()
            }
            None => vec![WizardEffect::ExitWizard],
        }
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    fn finish_submit(&mut self, outcome: SubmitOutcome) -> Vec<WizardEffect> {
        match outcome {
            SubmitOutcome::Accepted => {
                // Session is destroyed on success.
                *self = Self::default();
                vec![WizardEffect::ExitWizard]
            }
            SubmitOutcome::Rejected { message } => {
                self.notice = Some(message.unwrap_or_else(|| GENERIC_SUBMIT_ERROR.to_string()));
                Vec::new()
            }
        }
    }
}

// =============================================================================
// FIELD → MASK MAPPING
// =============================================================================

/// Mask applied while typing into a field, if any.
#[must_use]
pub fn mask_for_field(name: &str) -> Option<MaskKind> {
    match name {
        fields::CPF => Some(MaskKind::Cpf),
        fields::RG => Some(MaskKind::Rg),
        fields::CEP => Some(MaskKind::Cep),
        fields::DATA_NASCIMENTO => Some(MaskKind::Date),
        fields::WHATSAPP => Some(MaskKind::Phone),
        _ if fields::is_reference_whatsapp(name) => Some(MaskKind::Phone),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(state: &mut WizardState, name: &str, value: &str) -> Vec<WizardEffect> {
        state.apply(WizardEvent::FieldEdited {
            name: name.to_string(),
            value: FieldValue::text(value),
        })
    }

    #[test]
    fn step_sequence_is_linear() {
        assert_eq!(Step::Personal.next(), Some(Step::Address));
        assert_eq!(Step::Address.next(), Some(Step::Employment));
        assert_eq!(Step::Employment.next(), Some(Step::References));
        assert_eq!(Step::References.next(), None);
        assert_eq!(Step::Personal.previous(), None);
        assert!(Step::Personal.is_first());
        assert!(Step::References.is_terminal());
    }

    #[test]
    fn step_display() {
        assert_eq!(format!("{}", Step::Personal), "Passo 1: Dados pessoais");
        assert_eq!(format!("{}", Step::References), "Passo 4: Referências");
    }

    #[test]
    fn editing_masks_text_fields() {
        let mut state = WizardState::new();
        edit(&mut state, fields::CPF, "11144477735");
        assert_eq!(state.fields().text(fields::CPF), "111.444.777-35");
    }

    #[test]
    fn editing_clears_that_fields_error() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::Advanced);
        assert!(state.errors().get(fields::NOME).is_some());

        edit(&mut state, fields::NOME, "Maria");
        assert!(state.errors().get(fields::NOME).is_none());
        // other errors stay until their fields are edited
        assert!(state.errors().get(fields::CPF).is_some());
    }

    #[test]
    fn advance_with_errors_keeps_step_and_unrelated_fields() {
        let mut state = WizardState::new();
        edit(&mut state, fields::RUA, "Rua das Flores");

        let effects = state.apply(WizardEvent::Advanced);
        assert!(effects.is_empty());
        assert_eq!(state.step(), Step::Personal);
        assert!(!state.errors().is_empty());
        // step-2 state untouched
        assert_eq!(state.fields().text(fields::RUA), "Rua das Flores");
    }

    #[test]
    fn completing_cep_dispatches_lookup_with_fresh_id() {
        let mut state = WizardState::new();
        let effects = edit(&mut state, fields::CEP, "01310930");
        assert_eq!(
            effects,
            vec![WizardEffect::LookupCep { request_id: 1, cep: "01310930".to_string() }]
        );

        // replacing the complete CEP wholesale re-dispatches
        let effects = edit(&mut state, fields::CEP, "04538132");
        assert_eq!(
            effects,
            vec![WizardEffect::LookupCep { request_id: 2, cep: "04538132".to_string() }]
        );
    }

    #[test]
    fn incomplete_cep_does_not_dispatch() {
        let mut state = WizardState::new();
        assert!(edit(&mut state, fields::CEP, "0131093").is_empty());
    }

    #[test]
    fn lookup_hit_overwrites_address_fields() {
        let mut state = WizardState::new();
        edit(&mut state, fields::RUA, "digitada pelo usuário");
        edit(&mut state, fields::CEP, "01310930");

        state.apply(WizardEvent::AddressResolved {
            request_id: 1,
            address: Some(LookupAddress {
                cep: "01310-930".to_string(),
                logradouro: "Avenida Paulista".to_string(),
                bairro: "Bela Vista".to_string(),
                cidade: "São Paulo".to_string(),
                estado: "SP".to_string(),
            }),
        });

        assert_eq!(state.fields().text(fields::RUA), "Avenida Paulista");
        assert_eq!(state.fields().text(fields::BAIRRO), "Bela Vista");
        assert_eq!(state.fields().text(fields::CIDADE), "São Paulo");
        assert_eq!(state.fields().text(fields::ESTADO), "SP");
    }

    #[test]
    fn lookup_miss_sets_cep_error_and_keeps_address() {
        let mut state = WizardState::new();
        edit(&mut state, fields::BAIRRO, "Centro");
        edit(&mut state, fields::CEP, "99999999");

        state.apply(WizardEvent::AddressResolved { request_id: 1, address: None });

        assert!(state.errors().get(fields::CEP).is_some());
        assert_eq!(state.fields().text(fields::BAIRRO), "Centro");
    }

    #[test]
    fn stale_lookup_response_is_discarded() {
        let mut state = WizardState::new();
        edit(&mut state, fields::CEP, "01310930"); // request 1
        edit(&mut state, fields::CEP, "04538132"); // request 2

        // request 1 resolves late; must not overwrite anything
        state.apply(WizardEvent::AddressResolved {
            request_id: 1,
            address: Some(LookupAddress {
                logradouro: "Rua Errada".to_string(),
                ..LookupAddress::default()
            }),
        });
        assert_eq!(state.fields().text(fields::RUA), "");

        // request 2 resolves normally
        state.apply(WizardEvent::AddressResolved {
            request_id: 2,
            address: Some(LookupAddress {
                logradouro: "Rua Certa".to_string(),
                ..LookupAddress::default()
            }),
        });
        assert_eq!(state.fields().text(fields::RUA), "Rua Certa");
    }

    #[test]
    fn shortening_complete_cep_clears_dependent_fields() {
        let mut state = WizardState::new();
        edit(&mut state, fields::CEP, "01310930");
        state.apply(WizardEvent::AddressResolved {
            request_id: 1,
            address: Some(LookupAddress {
                logradouro: "Avenida Paulista".to_string(),
                bairro: "Bela Vista".to_string(),
                cidade: "São Paulo".to_string(),
                estado: "SP".to_string(),
                ..LookupAddress::default()
            }),
        });

        edit(&mut state, fields::CEP, "0131093");

        assert_eq!(state.fields().text(fields::RUA), "");
        assert_eq!(state.fields().text(fields::BAIRRO), "");
        assert_eq!(state.fields().text(fields::CIDADE), "");
        assert_eq!(state.fields().text(fields::ESTADO), "");
    }

    #[test]
    fn retreat_never_validates_and_exits_from_step_one() {
        let mut state = WizardState::new();
        assert_eq!(state.apply(WizardEvent::Retreated), vec![WizardEffect::ExitWizard]);

        // walk to step 2 legitimately, then back without valid fields
        fill_personal(&mut state);
        state.apply(WizardEvent::Advanced);
        assert_eq!(state.step(), Step::Address);
        assert!(state.apply(WizardEvent::Retreated).is_empty());
        assert_eq!(state.step(), Step::Personal);
    }

    #[test]
    fn rejected_submit_surfaces_backend_message_verbatim() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::SubmitFinished {
            outcome: SubmitOutcome::Rejected { message: Some("CPF já cadastrado".to_string()) },
        });
        assert_eq!(state.notice(), Some("CPF já cadastrado"));

        state.apply(WizardEvent::NoticeDismissed);
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn rejected_submit_without_message_uses_generic_fallback() {
        let mut state = WizardState::new();
        edit(&mut state, fields::NOME, "Maria");
        state.apply(WizardEvent::SubmitFinished {
            outcome: SubmitOutcome::Rejected { message: None },
        });
        assert_eq!(state.notice(), Some(GENERIC_SUBMIT_ERROR));
        // entered data is never lost on failure
        assert_eq!(state.fields().text(fields::NOME), "Maria");
    }

    #[test]
    fn accepted_submit_resets_session_and_exits() {
        let mut state = WizardState::new();
        edit(&mut state, fields::NOME, "Maria");
        let effects =
            state.apply(WizardEvent::SubmitFinished { outcome: SubmitOutcome::Accepted });
        assert_eq!(effects, vec![WizardEffect::ExitWizard]);
        assert_eq!(state.step(), Step::Personal);
        assert!(state.fields().is_empty());
    }

    #[test]
    fn mask_for_field_covers_reference_whatsapp() {
        assert_eq!(mask_for_field(fields::CPF), Some(MaskKind::Cpf));
        assert_eq!(mask_for_field("referencia3Whatsapp"), Some(MaskKind::Phone));
        assert_eq!(mask_for_field(fields::NOME), None);
    }

    fn fill_personal(state: &mut WizardState) {
        edit(state, fields::NOME, "Maria da Silva");
        edit(state, fields::CPF, "11144477735");
        edit(state, fields::ESTADO_CIVIL, "solteira");
        edit(state, fields::DATA_NASCIMENTO, "01011990");
        edit(state, fields::EMAIL, "maria@example.com");
        edit(state, fields::WHATSAPP, "11987654321");
    }
}
