//! # Crediário CLI Module
//!
//! ## Available Commands
//!
//! - `intake` - Run the interactive client-intake wizard (default)
//! - `cep` - Look up a postal code
//! - `clientes` - List registered clients with pagination and search
//! - `validar` - Re-mask and verify a document (cpf, cnpj)

mod commands;

use clap::{Parser, Subcommand};
use crediario_core::CrediarioError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Crediário - Console de Cadastros
///
/// Terminal do back-office de crediário: cadastro de clientes em 4
/// passos, consultas de CEP e listagem de clientes do backend.
#[derive(Parser, Debug)]
#[command(name = "crediario")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cadastro interativo de cliente (assistente em 4 passos)
    Intake,

    /// Consulta um CEP no serviço postal
    Cep {
        /// Código postal, com ou sem máscara
        codigo: String,
    },

    /// Lista clientes cadastrados no backend
    Clientes {
        /// Página a exibir (1-based)
        #[arg(short = 'p', long, default_value = "1")]
        pagina: usize,

        /// Itens por página
        #[arg(long, default_value = "10")]
        por_pagina: usize,

        /// Filtro por nome ou CPF
        #[arg(short, long)]
        busca: Option<String>,
    },

    /// Valida e formata um documento
    Validar {
        /// Tipo do documento (cpf, cnpj)
        tipo: String,

        /// Valor, com ou sem máscara
        valor: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CrediarioError> {
    let config = crate::config::AppConfig::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        // No subcommand: go straight into the intake wizard.
        Some(Commands::Intake) | None => cmd_intake(&config).await,
        Some(Commands::Cep { codigo }) => cmd_cep(&config, &codigo, json_mode).await,
        Some(Commands::Clientes { pagina, por_pagina, busca }) => {
            cmd_clientes(&config, pagina, por_pagina, busca.as_deref(), json_mode).await
        }
        Some(Commands::Validar { tipo, valor }) => cmd_validar(&tipo, &valor, json_mode),
    }
}
