use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error envelope returned on every rejected webhook call.
///
/// `codigo` is a stable machine-readable identifier; integrations branch on it,
/// so existing values never change. `erro` is the human-readable message and
/// may be reworded freely.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub sucesso: bool,
    pub erro: String,
    pub codigo: String,
}

impl ErrorResponse {
    pub fn new(erro: impl Into<String>, codigo: impl Into<String>) -> Self {
        Self {
            sucesso: false,
            erro: erro.into(),
            codigo: codigo.into(),
        }
    }
}
