//! # Backend HTTP Client
//!
//! Wrapper around the admin REST backend used by the console. The backend
//! owns all persistence and record validation; this client only ships
//! payloads and surfaces its answers.

use crate::config::BackendConfig;
use crediario_core::{ClientPayload, CrediarioError};
use serde::{Deserialize, Serialize};

// =============================================================================
// CLIENT ERRORS
// =============================================================================

/// Errors from the HTTP client layer.
#[derive(Debug)]
pub enum ClientError {
    /// Cannot reach the backend.
    ConnectionFailed(String),
    /// 401 Unauthorized - invalid or missing API key.
    Unauthorized,
    /// 429 Too Many Requests.
    RateLimited,
    /// Any other 4xx; carries the backend's own message when it sent one.
    Rejected(Option<String>),
    /// Backend returned a 5xx error.
    ServerError(u16, String),
    /// Failed to parse a response body.
    ParseError(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(url) => write!(f, "sem conexão com o backend em {url}"),
            Self::Unauthorized => write!(f, "não autorizado: chave de API ausente ou inválida"),
            Self::RateLimited => write!(f, "limite de requisições excedido"),
            Self::Rejected(Some(message)) => write!(f, "{message}"),
            Self::Rejected(None) => write!(f, "requisição recusada pelo backend"),
            Self::ServerError(status, message) => {
                write!(f, "erro do servidor ({status}): {message}")
            }
            Self::ParseError(message) => write!(f, "resposta inválida: {message}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for CrediarioError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Rejected(Some(message)) => CrediarioError::Backend(message),
            other => CrediarioError::Transport(other.to_string()),
        }
    }
}

/// Error body the backend attaches to rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// `POST /clientes` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedClient {
    pub id: u64,
}

/// One row of the client listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: u64,
    pub nome: String,
    /// Digits only, as stored by the backend.
    pub cpf: String,
    /// Digits only.
    pub whatsapp: String,
    pub status: String,
}

/// `GET /clientes` response: one page of summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPage {
    pub itens: Vec<ClientSummary>,
    pub pagina: usize,
    pub total_paginas: usize,
    pub total: usize,
}

// =============================================================================
// BACKEND CLIENT
// =============================================================================

/// HTTP client for the admin backend.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl BackendClient {
    /// Create a new client pointing at the given backend URL.
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url, api_key }
    }

    /// Create a client from the `[backend]` config table.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.url.clone(), config.api_key.clone())
    }

    /// Build a request with optional Bearer auth.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    /// Send a request and handle connection errors.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        req.send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{}: {e}", self.base_url)))
    }

    /// Handle HTTP response: status-code triage, then JSON parse.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }
        if status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServerError(status.as_u16(), body));
        }
        if status.is_client_error() {
            // Surface the backend's message verbatim when it sent one.
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body).ok().and_then(|b| b.error);
            return Err(ClientError::Rejected(message));
        }
        resp.json::<T>().await.map_err(|e| ClientError::ParseError(e.to_string()))
    }

    /// POST /clientes → register a new client.
    pub async fn create_client(&self, payload: &ClientPayload) -> Result<CreatedClient, ClientError> {
        let req = self.request(reqwest::Method::POST, "/clientes").json(payload);
        let resp = self.send(req).await?;
        self.handle_response(resp).await
    }

    /// GET /clientes → one page of the client listing.
    pub async fn list_clients(
        &self,
        page: usize,
        per_page: usize,
        search: Option<&str>,
    ) -> Result<ClientPage, ClientError> {
        let mut query: Vec<(&str, String)> = vec![
            ("pagina", page.to_string()),
            ("porPagina", per_page.to_string()),
        ];
        if let Some(term) = search {
            query.push(("busca", term.to_string()));
        }
        let req = self.request(reqwest::Method::GET, "/clientes").query(&query);
        let resp = self.send(req).await?;
        self.handle_response(resp).await
    }
}
