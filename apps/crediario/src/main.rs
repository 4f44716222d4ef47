//! # Crediário - Console de Cadastros
//!
//! The main binary for the Crediário back-office console.
//!
//! This application provides:
//! - Interactive client-intake wizard (terminal)
//! - Postal-code lookups against the external CEP service
//! - Client listing with pagination and search
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                  apps/crediario (THE BINARY)                   │
//! │                                                                │
//! │  ┌─────────────┐   ┌──────────────┐   ┌────────────────────┐  │
//! │  │    CLI      │   │ Intake shell │   │   HTTP clients     │  │
//! │  │   (clap)    │   │  (prompts)   │   │ (backend + CEP)    │  │
//! │  └──────┬──────┘   └──────┬───────┘   └─────────┬──────────┘  │
//! │         │                 │                     │             │
//! │         └─────────────────┼─────────────────────┘             │
//! │                           ▼                                   │
//! │                 ┌──────────────────┐                          │
//! │                 │  crediario-core  │                          │
//! │                 │   (THE LOGIC)    │                          │
//! │                 └──────────────────┘                          │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Interactive client intake
//! crediario intake
//!
//! # Back-office queries
//! crediario cep 01310-930
//! crediario clientes --pagina 2 --busca maria
//! crediario validar cnpj 11.222.333/0001-81
//! ```

use clap::Parser;
use crediario::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing - CREDIARIO_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("CREDIARIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crediario=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Erro: {}", e);
        std::process::exit(1);
    }
}

/// Print the Crediário startup banner.
fn print_banner() {
    println!(
        r#"
   ██████╗██████╗ ███████╗██████╗ ██╗ █████╗ ██████╗ ██╗ ██████╗
  ██╔════╝██╔══██╗██╔════╝██╔══██╗██║██╔══██╗██╔══██╗██║██╔═══██╗
  ██║     ██████╔╝█████╗  ██║  ██║██║███████║██████╔╝██║██║   ██║
  ██║     ██╔══██╗██╔══╝  ██║  ██║██║██╔══██║██╔══██╗██║██║   ██║
  ╚██████╗██║  ██║███████╗██████╔╝██║██║  ██║██║  ██║██║╚██████╔╝
   ╚═════╝╚═╝  ╚═╝╚══════╝╚═════╝ ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚═╝ ╚═════╝

  Console de Cadastros v{}

  Clientes • Consultas • Crediário
"#,
        env!("CARGO_PKG_VERSION")
    );
}
