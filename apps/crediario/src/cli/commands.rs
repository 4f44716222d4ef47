//! # CLI Command Implementations

use crate::cep::CepClient;
use crate::client::{BackendClient, ClientPage};
use crate::config::AppConfig;
use crate::intake;
use crediario_core::{
    CrediarioError, MaskKind, PageToken, apply_mask, is_valid_cnpj, page_window, strip_digits,
    validate::{CEP_DIGITS, CPF_DIGITS},
};

/// Pages shown on each side of the current one in listing output.
const PAGE_WINDOW_RADIUS: usize = 2;

// =============================================================================
// INTAKE COMMAND
// =============================================================================

/// Run the interactive intake wizard.
pub async fn cmd_intake(config: &AppConfig) -> Result<(), CrediarioError> {
    let backend = BackendClient::from_config(&config.backend);
    let cep_client = CepClient::from_config(&config.cep);
    intake::run(&backend, &cep_client).await
}

// =============================================================================
// CEP COMMAND
// =============================================================================

/// One-shot postal lookup.
pub async fn cmd_cep(config: &AppConfig, codigo: &str, json_mode: bool) -> Result<(), CrediarioError> {
    let digits = strip_digits(codigo);
    if digits.len() != CEP_DIGITS {
        return Err(CrediarioError::InvalidInput(format!(
            "CEP deve conter {CEP_DIGITS} dígitos"
        )));
    }

    let cep_client = CepClient::from_config(&config.cep);
    let address = cep_client.lookup(&digits).await.map_err(CrediarioError::from)?;

    match address {
        Some(found) => {
            if json_mode {
                println!("{}", to_json(&found)?);
            } else {
                println!("CEP:        {}", found.cep);
                println!("Logradouro: {}", found.logradouro);
                println!("Bairro:     {}", found.bairro);
                println!("Cidade:     {}", found.cidade);
                println!("Estado:     {}", found.estado);
            }
        }
        None => {
            if json_mode {
                println!("{}", serde_json::json!({ "erro": true }));
            } else {
                println!("CEP não encontrado.");
            }
        }
    }
    Ok(())
}

// =============================================================================
// CLIENTES COMMAND
// =============================================================================

/// List registered clients, one page at a time.
pub async fn cmd_clientes(
    config: &AppConfig,
    pagina: usize,
    por_pagina: usize,
    busca: Option<&str>,
    json_mode: bool,
) -> Result<(), CrediarioError> {
    let backend = BackendClient::from_config(&config.backend);
    let page = backend
        .list_clients(pagina, por_pagina, busca)
        .await
        .map_err(CrediarioError::from)?;

    if json_mode {
        println!("{}", to_json(&page)?);
        return Ok(());
    }

    print_client_table(&page);
    Ok(())
}

fn print_client_table(page: &ClientPage) {
    if page.itens.is_empty() {
        println!("Nenhum cliente encontrado.");
        return;
    }

    println!("{:<6} {:<30} {:<15} {:<16} {}", "ID", "Nome", "CPF", "WhatsApp", "Status");
    for cliente in &page.itens {
        println!(
            "{:<6} {:<30} {:<15} {:<16} {}",
            cliente.id,
            cliente.nome,
            apply_mask(&cliente.cpf, MaskKind::Cpf),
            apply_mask(&cliente.whatsapp, MaskKind::Phone),
            cliente.status,
        );
    }
    println!();
    println!(
        "Página {} de {} ({} clientes)   {}",
        page.pagina,
        page.total_paginas,
        page.total,
        render_page_bar(page.pagina, page.total_paginas),
    );
}

/// Render the pagination window ("1 ... 4 [5] 6 ... 20").
#[must_use]
pub fn render_page_bar(current: usize, total_pages: usize) -> String {
    page_window(current, total_pages, PAGE_WINDOW_RADIUS)
        .iter()
        .map(|token| match token {
            PageToken::Page(page) if *page == current => format!("[{page}]"),
            PageToken::Page(page) => page.to_string(),
            PageToken::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// VALIDAR COMMAND
// =============================================================================

/// Re-mask a document and report its validity.
pub fn cmd_validar(tipo: &str, valor: &str, json_mode: bool) -> Result<(), CrediarioError> {
    let (formatted, valid, detail) = match tipo.to_ascii_lowercase().as_str() {
        "cpf" => {
            let formatted = apply_mask(valor, MaskKind::Cpf);
            let valid = strip_digits(valor).len() == CPF_DIGITS;
            (formatted, valid, "11 dígitos")
        }
        "cnpj" => {
            let formatted = apply_mask(valor, MaskKind::Cnpj);
            let valid = is_valid_cnpj(valor);
            (formatted, valid, "dígitos verificadores")
        }
        other => {
            return Err(CrediarioError::InvalidInput(format!(
                "Tipo de documento desconhecido: {other} (use cpf ou cnpj)"
            )));
        }
    };

    if json_mode {
        println!(
            "{}",
            serde_json::json!({
                "tipo": tipo.to_ascii_lowercase(),
                "formatado": formatted,
                "valido": valid,
            })
        );
    } else {
        println!("Formatado: {formatted}");
        if valid {
            println!("Válido ({detail}).");
        } else {
            println!("Inválido ({detail}).");
        }
    }
    Ok(())
}

// =============================================================================
// JSON OUTPUT
// =============================================================================

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CrediarioError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CrediarioError::IoError(format!("Falha ao serializar saída: {e}")))
}
