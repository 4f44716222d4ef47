//! # Postal-Code Client
//!
//! Lookup against the external postal service. The contract: an 8-digit
//! code resolves to a street/district/city/state record with the
//! formatted code echoed back, or an explicit not-found marker. The
//! wizard treats transport failures identically to not-found, so callers
//! usually collapse the error channel with `.ok().flatten()`.

use crate::client::ClientError;
use crate::config::CepConfig;
use crediario_core::LookupAddress;
use serde::Deserialize;

/// Service response. Field aliases cover the ViaCEP spelling
/// (`localidade`/`uf`) so the default public service works out of the box.
#[derive(Debug, Deserialize)]
struct CepResponse {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default, alias = "localidade")]
    cidade: String,
    #[serde(default, alias = "uf")]
    estado: String,
    /// Explicit not-found marker (`{"erro": true}`).
    #[serde(default)]
    erro: bool,
}

/// HTTP client for the postal-code service.
#[derive(Clone)]
pub struct CepClient {
    http: reqwest::Client,
    base_url: String,
}

impl CepClient {
    /// Create a new client pointing at the given service URL.
    pub fn new(base_url: String) -> Self {
        Self { http: reqwest::Client::new(), base_url }
    }

    /// Create a client from the `[cep]` config table.
    pub fn from_config(config: &CepConfig) -> Self {
        Self::new(config.url.clone())
    }

    /// GET `{base}/{cep}/json/` → `Ok(None)` when the code is unknown.
    pub async fn lookup(&self, cep_digits: &str) -> Result<Option<LookupAddress>, ClientError> {
        let url = format!("{}/{}/json/", self.base_url, cep_digits);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{url}: {e}")))?;

        // The service answers malformed codes with 4xx; treat as a miss.
        if !resp.status().is_success() {
            return Ok(None);
        }

        let body: CepResponse =
            resp.json().await.map_err(|e| ClientError::ParseError(e.to_string()))?;
        if body.erro {
            return Ok(None);
        }
        Ok(Some(LookupAddress {
            cep: body.cep,
            logradouro: body.logradouro,
            bairro: body.bairro,
            cidade: body.cidade,
            estado: body.estado,
        }))
    }
}
