//! # Terminal Intake Wizard
//!
//! Drives the core wizard reducer from an interactive prompt loop: every
//! answer becomes a `FieldEdited` event, the effects the reducer returns
//! are executed here (postal lookup, final submission) and their results
//! are fed back in as events. The reducer owns every rule; this module is
//! pure shell.

use crate::cep::CepClient;
use crate::client::{BackendClient, ClientError};
use crediario_core::{
    CrediarioError, FieldValue, Step, SubmitOutcome, WizardEffect, WizardEvent, WizardState,
    fields::{self, ReferencePart},
};
use std::collections::VecDeque;
use std::io::{self, Write};

/// Typed instead of an answer to go back one step.
const BACK_COMMAND: &str = "<";

// =============================================================================
// PROMPTS
// =============================================================================

enum PromptKind {
    Text,
    Flag,
}

struct Prompt {
    name: String,
    label: String,
    kind: PromptKind,
}

impl Prompt {
    fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self { name: name.into(), label: label.into(), kind: PromptKind::Text }
    }

    fn flag(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self { name: name.into(), label: label.into(), kind: PromptKind::Flag }
    }
}

fn step_prompts(step: Step) -> Vec<Prompt> {
    match step {
        Step::Personal => vec![
            Prompt::text(fields::NOME, "Nome completo"),
            Prompt::text(fields::CPF, "CPF"),
            Prompt::text(fields::RG, "RG (opcional)"),
            Prompt::text(fields::ESTADO_CIVIL, "Estado civil"),
            Prompt::text(fields::DATA_NASCIMENTO, "Data de nascimento (DD/MM/AAAA)"),
            Prompt::text(fields::EMAIL, "E-mail"),
            Prompt::text(fields::WHATSAPP, "WhatsApp"),
        ],
        Step::Address => vec![
            Prompt::text(fields::CEP, "CEP"),
            Prompt::text(fields::RUA, "Rua"),
            Prompt::text(fields::NUMERO, "Número"),
            Prompt::text(fields::COMPLEMENTO, "Complemento (opcional)"),
            Prompt::text(fields::BAIRRO, "Bairro"),
            Prompt::text(fields::CIDADE, "Cidade"),
            Prompt::text(fields::ESTADO, "Estado (UF)"),
        ],
        Step::Employment => vec![
            Prompt::text(fields::NOME_EMPRESA, "Empresa"),
            Prompt::text(fields::POSSUI_CARTEIRA, "Possui carteira assinada ou é aposentado? (sim/não)"),
            Prompt::text(fields::RENDA_MENSAL, "Renda mensal (R$)"),
            Prompt::text(fields::COMPROVACAO_RENDA, "Comprovação de renda"),
        ],
        Step::References => (1..=fields::REFERENCE_SLOTS)
            .flat_map(|slot| {
                vec![
                    Prompt::text(
                        fields::reference_field(slot, ReferencePart::Nome),
                        format!("Referência {slot} - nome"),
                    ),
                    Prompt::text(
                        fields::reference_field(slot, ReferencePart::Relacao),
                        format!("Referência {slot} - relação"),
                    ),
                    Prompt::text(
                        fields::reference_field(slot, ReferencePart::Whatsapp),
                        format!("Referência {slot} - WhatsApp"),
                    ),
                    Prompt::flag(
                        fields::reference_field(slot, ReferencePart::Conhece),
                        format!("Referência {slot} - cliente conhece pessoalmente? (s/n)"),
                    ),
                ]
            })
            .collect(),
    }
}

// =============================================================================
// DRIVER
// =============================================================================

/// Run the intake wizard until it exits (submitted or cancelled).
pub async fn run(backend: &BackendClient, cep_client: &CepClient) -> Result<(), CrediarioError> {
    let mut state = WizardState::new();

    println!("Cadastro de cliente em 4 passos.");
    println!("Enter mantém o valor atual; '{BACK_COMMAND}' volta um passo.");

    'steps: loop {
        let step = state.step();
        println!();
        println!("── {step} ──");

        for prompt in step_prompts(step) {
            let answer = ask(&state, &prompt)?;
            let Some(raw) = answer else {
                continue; // Enter: keep the current value
            };

            if raw == BACK_COMMAND {
                let effects = state.apply(WizardEvent::Retreated);
                if execute_effects(&mut state, effects, backend, cep_client).await? {
                    println!("Cadastro cancelado.");
                    return Ok(());
                }
                continue 'steps;
            }

            let value = match prompt.kind {
                PromptKind::Text => FieldValue::Text(raw),
                PromptKind::Flag => {
                    FieldValue::Flag(matches!(raw.to_lowercase().as_str(), "s" | "sim"))
                }
            };
            let effects = state.apply(WizardEvent::FieldEdited {
                name: prompt.name.clone(),
                value,
            });
            echo_masked(&state, &prompt);
            if execute_effects(&mut state, effects, backend, cep_client).await? {
                return Ok(());
            }
        }

        let effects = state.apply(WizardEvent::Advanced);
        let exited = execute_effects(&mut state, effects, backend, cep_client).await?;
        print_feedback(&mut state);
        if exited {
            return Ok(());
        }
    }
}

/// Execute the reducer's effects, feeding results back in as events.
/// Returns `true` when the wizard asked to exit.
async fn execute_effects(
    state: &mut WizardState,
    effects: Vec<WizardEffect>,
    backend: &BackendClient,
    cep_client: &CepClient,
) -> Result<bool, CrediarioError> {
    let mut queue: VecDeque<WizardEffect> = effects.into();
    let mut exited = false;

    while let Some(effect) = queue.pop_front() {
        match effect {
            WizardEffect::LookupCep { request_id, cep } => {
                let address = match cep_client.lookup(&cep).await {
                    Ok(found) => found,
                    Err(error) => {
                        // Transport failure and not-found look the same to
                        // the wizard; only the log keeps the distinction.
                        tracing::warn!("Consulta de CEP falhou: {}", error);
                        None
                    }
                };
                queue.extend(state.apply(WizardEvent::AddressResolved { request_id, address }));
                print_lookup_result(state);
            }
            WizardEffect::SubmitClient { payload } => {
                println!("Enviando cadastro...");
                let outcome = match backend.create_client(&payload).await {
                    Ok(created) => {
                        println!("Cadastro concluído. Código do cliente: {}", created.id);
                        SubmitOutcome::Accepted
                    }
                    Err(ClientError::Rejected(message)) => SubmitOutcome::Rejected { message },
                    Err(other) => {
                        tracing::warn!("Envio do cadastro falhou: {}", other);
                        SubmitOutcome::Rejected { message: None }
                    }
                };
                queue.extend(state.apply(WizardEvent::SubmitFinished { outcome }));
            }
            WizardEffect::ExitWizard => {
                exited = true;
            }
        }
    }
    Ok(exited)
}

// =============================================================================
// CONSOLE HELPERS
// =============================================================================

/// Prompt for one field. `None` means "keep the current value".
fn ask(state: &WizardState, prompt: &Prompt) -> Result<Option<String>, CrediarioError> {
    let current = match prompt.kind {
        PromptKind::Text => state.fields().text(&prompt.name).to_string(),
        PromptKind::Flag => {
            if state.fields().flag(&prompt.name) { "sim".to_string() } else { String::new() }
        }
    };
    let suffix = if current.is_empty() { String::new() } else { format!(" [atual: {current}]") };

    print!("{}{}: ", prompt.label, suffix);
    io::stdout().flush().map_err(|e| CrediarioError::IoError(e.to_string()))?;

    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .map_err(|e| CrediarioError::IoError(e.to_string()))?;
    if read == 0 {
        return Err(CrediarioError::IoError("entrada encerrada (EOF)".to_string()));
    }
    let trimmed = line.trim();
    if trimmed.is_empty() { Ok(None) } else { Ok(Some(trimmed.to_string())) }
}

/// Show the stored (masked) value when it differs from what was typed.
fn echo_masked(state: &WizardState, prompt: &Prompt) {
    if matches!(prompt.kind, PromptKind::Text) {
        let stored = state.fields().text(&prompt.name);
        if !stored.is_empty() && crediario_core::mask_for_field(&prompt.name).is_some() {
            println!("  → {stored}");
        }
    }
}

/// Immediate feedback after a postal lookup resolves.
fn print_lookup_result(state: &WizardState) {
    if state.errors().get(fields::CEP).is_some() {
        println!("  CEP não encontrado; preencha o endereço manualmente.");
        return;
    }
    let rua = state.fields().text(fields::RUA);
    if !rua.is_empty() {
        println!(
            "  Endereço: {}, {} - {}/{}",
            rua,
            state.fields().text(fields::BAIRRO),
            state.fields().text(fields::CIDADE),
            state.fields().text(fields::ESTADO),
        );
    }
}

/// Print step errors and the transient submission notice, if any.
fn print_feedback(state: &mut WizardState) {
    if !state.errors().is_empty() {
        println!();
        println!("Corrija os campos abaixo:");
        for (field, message) in state.errors().iter() {
            println!("  - {field}: {message}");
        }
    }
    let notice = state.notice().map(str::to_string);
    if let Some(text) = notice {
        println!();
        println!("{text}");
        state.apply(WizardEvent::NoticeDismissed);
    }
}
