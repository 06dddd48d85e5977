use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request DTO for an inbound quote submission.
///
/// Field names are the Portuguese keys the chat assistant sends. Everything is
/// optional at the serde layer; presence and content rules are enforced by the
/// `Validate` derive plus the sanitizer, so a missing field yields a field-level
/// message instead of a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct WebhookPayloadDto {
    #[validate(required(message = "objeto cliente é obrigatório"), nested)]
    pub cliente: Option<ClientePayloadDto>,

    #[validate(required(message = "objeto cotacao é obrigatório"), nested)]
    pub cotacao: Option<CotacaoPayloadDto>,
}

/// Customer block of the webhook payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ClientePayloadDto {
    /// Customer name (required, at most 100 characters after trimming)
    #[validate(required(message = "cliente.nome é obrigatório"))]
    #[schema(example = "Maria da Silva")]
    pub nome: Option<String>,

    /// Phone in any formatting; normalized to bare digits before storage
    #[validate(required(message = "cliente.telefone é obrigatório"))]
    #[schema(example = "(11) 99999-9999")]
    pub telefone: Option<String>,

    pub endereco: Option<String>,
    pub bairro: Option<String>,

    /// CEP, stripped to digits
    #[schema(example = "01310-100")]
    pub cep: Option<String>,
}

/// Quote block of the webhook payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CotacaoPayloadDto {
    /// Requested services (required, at least one non-empty entry)
    #[validate(
        required(message = "cotacao.tipo_servico é obrigatório"),
        length(min = 1, message = "cotacao.tipo_servico não pode ser vazio")
    )]
    #[schema(example = json!(["eletrica", "pintura"]))]
    pub tipo_servico: Option<Vec<String>>,

    pub descricao: Option<String>,

    /// Estimated value in BRL; non-positive values are discarded
    #[schema(example = 350.0)]
    pub valor_estimado: Option<f64>,

    /// Date as the customer phrased it ("sexta de manhã", "2026-09-01", ...)
    pub data_servico_desejada: Option<String>,
    pub horario_inicio: Option<String>,
    pub horario_fim: Option<String>,

    /// Channel that produced the lead; defaults to "chatbot"
    pub origem_lead: Option<String>,
    pub ocasiao: Option<String>,
    pub observacoes: Option<String>,
}

/// Response DTO for an accepted submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteAcceptedDto {
    pub sucesso: bool,
    pub cliente_id: Uuid,
    pub cotacao_id: Uuid,
    /// True when this call created the client record
    pub cliente_novo: bool,
    pub mensagem: String,
}

impl QuoteAcceptedDto {
    pub fn new(cliente_id: Uuid, cotacao_id: Uuid, cliente_novo: bool) -> Self {
        Self {
            sucesso: true,
            cliente_id,
            cotacao_id,
            cliente_novo,
            mensagem: "Cotação registrada com sucesso.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> WebhookPayloadDto {
        WebhookPayloadDto {
            cliente: Some(ClientePayloadDto {
                nome: Some("Maria da Silva".into()),
                telefone: Some("(11) 99999-9999".into()),
                ..Default::default()
            }),
            cotacao: Some(CotacaoPayloadDto {
                tipo_servico: Some(vec!["eletrica".into()]),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn test_missing_cliente_block_fails() {
        let payload = WebhookPayloadDto {
            cliente: None,
            ..valid_payload()
        };
        let err = payload.validate().unwrap_err().to_string();
        assert!(err.contains("objeto cliente é obrigatório"), "got: {err}");
    }

    #[test]
    fn test_missing_nome_fails() {
        let mut payload = valid_payload();
        payload.cliente.as_mut().unwrap().nome = None;
        let err = payload.validate().unwrap_err().to_string();
        assert!(err.contains("cliente.nome é obrigatório"), "got: {err}");
    }

    #[test]
    fn test_missing_telefone_fails() {
        let mut payload = valid_payload();
        payload.cliente.as_mut().unwrap().telefone = None;
        let err = payload.validate().unwrap_err().to_string();
        assert!(err.contains("cliente.telefone é obrigatório"), "got: {err}");
    }

    #[test]
    fn test_empty_tipo_servico_fails() {
        let mut payload = valid_payload();
        payload.cotacao.as_mut().unwrap().tipo_servico = Some(vec![]);
        let err = payload.validate().unwrap_err().to_string();
        assert!(err.contains("cotacao.tipo_servico não pode ser vazio"), "got: {err}");
    }

    #[test]
    fn test_unknown_json_keys_are_ignored() {
        let payload: WebhookPayloadDto = serde_json::from_value(serde_json::json!({
            "cliente": { "nome": "Ana", "telefone": "11988887777", "extra": 1 },
            "cotacao": { "tipo_servico": ["jardinagem"], "campo_novo": true }
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }
}
