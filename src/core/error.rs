use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("method not allowed: {0}")]
    MethodNotAllowed(axum::http::Method),

    #[error("rate limit exceeded for caller {key}")]
    RateLimited { key: String, retry_after_secs: u64 },

    #[error("webhook secret is not configured")]
    MissingSecret,

    #[error("signature header is missing")]
    MissingSignature,

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("payload exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("client lookup failed")]
    ClientLookup(#[source] sqlx::Error),

    #[error("client insert failed")]
    ClientInsert(#[source] sqlx::Error),

    #[error("quote insert failed")]
    QuoteInsert(#[source] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code carried in the response envelope.
    /// Integrations branch on these values; never rename an existing one.
    pub fn codigo(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed(_) => "METODO_INVALIDO",
            AppError::RateLimited { .. } => "RATE_LIMIT_EXCEEDED",
            AppError::MissingSecret => "CONFIG_ERROR",
            AppError::MissingSignature => "AUTH_MISSING",
            AppError::InvalidSignature => "AUTH_INVALID",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::InvalidJson(_) => "JSON_INVALIDO",
            AppError::Validation(_) => "VALIDACAO_FALHOU",
            AppError::ClientLookup(_) => "ERRO_CONSULTA",
            AppError::ClientInsert(_) => "ERRO_CRIACAO_CLIENTE",
            AppError::QuoteInsert(_) => "ERRO_CRIACAO_COTACAO",
            AppError::Internal(_) => "ERRO_INTERNO",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::MissingSignature | AppError::InvalidSignature => StatusCode::UNAUTHORIZED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InvalidJson(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MissingSecret
            | AppError::ClientLookup(_)
            | AppError::ClientInsert(_)
            | AppError::QuoteInsert(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Storage and configuration failures stay
    /// generic on the wire; details go to the log instead.
    fn erro(&self) -> String {
        match self {
            AppError::MethodNotAllowed(method) => {
                format!("Método {} não permitido. Utilize POST.", method)
            }
            AppError::RateLimited { .. } => {
                "Limite de requisições excedido. Tente novamente mais tarde.".to_string()
            }
            AppError::MissingSecret => "Webhook não configurado no servidor.".to_string(),
            AppError::MissingSignature => "Cabeçalho de assinatura ausente.".to_string(),
            AppError::InvalidSignature => "Assinatura inválida.".to_string(),
            AppError::PayloadTooLarge(_) => {
                "Corpo da requisição excede o tamanho máximo permitido.".to_string()
            }
            AppError::InvalidJson(detail) => format!("JSON inválido: {}", detail),
            AppError::Validation(msg) => msg.clone(),
            AppError::ClientLookup(_) => "Erro ao consultar cliente.".to_string(),
            AppError::ClientInsert(_) => "Erro ao criar cliente.".to_string(),
            AppError::QuoteInsert(_) => "Erro ao criar cotação.".to_string(),
            AppError::Internal(_) => "Erro interno do servidor.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MissingSecret => {
                tracing::error!("WEBHOOK_SECRET is not configured; rejecting request")
            }
            AppError::ClientLookup(e) => tracing::error!("Client lookup failed: {:?}", e),
            AppError::ClientInsert(e) => tracing::error!("Client insert failed: {:?}", e),
            AppError::QuoteInsert(e) => tracing::error!("Quote insert failed: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => {}
        }

        let status = self.status();
        let body = Json(ErrorResponse::new(self.erro(), self.codigo()));
        let mut response = (status, body).into_response();

        if let AppError::RateLimited {
            retry_after_secs, ..
        } = &self
        {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
