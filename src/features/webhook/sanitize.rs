//! Bounds and normalizes webhook payloads before they reach storage.
//!
//! Required fields reject the whole payload with a field-level message;
//! optional fields degrade instead: whitespace-only values become absent,
//! overlong values are cut at a per-field character cap. Length caps count
//! characters, not bytes.

use crate::core::error::{AppError, Result};
use crate::features::webhook::dtos::{ClientePayloadDto, CotacaoPayloadDto, WebhookPayloadDto};
use crate::shared::validation::{digits_only, normalize_phone, truncate_chars};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_ADDRESS_CHARS: usize = 200;
pub const MAX_NEIGHBORHOOD_CHARS: usize = 100;
pub const MAX_POSTAL_CODE_DIGITS: usize = 8;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;
pub const MAX_OCCASION_CHARS: usize = 100;
pub const MAX_OBSERVATIONS_CHARS: usize = 500;
pub const MAX_LEAD_SOURCE_CHARS: usize = 50;
pub const MAX_SERVICE_TYPES: usize = 10;
pub const MAX_SERVICE_TYPE_CHARS: usize = 50;
pub const MAX_ESTIMATED_VALUE: f64 = 1_000_000.0;

/// Lead source recorded when the payload does not name one.
pub const DEFAULT_LEAD_SOURCE: &str = "chatbot";

/// Customer fields after trimming, truncation and phone normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedClient {
    pub name: String,
    /// Bare digits, 10 or 11 of them.
    pub phone: String,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub postal_code: Option<String>,
}

/// Quote fields after trimming and bounding.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedQuote {
    /// Non-empty; every entry trimmed and capped.
    pub service_types: Vec<String>,
    pub description: Option<String>,
    pub estimated_value: Option<f64>,
    pub desired_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub occasion: Option<String>,
    pub observations: Option<String>,
}

/// A submission ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedSubmission {
    pub client: SanitizedClient,
    pub quote: SanitizedQuote,
    /// Shared by the client record and the quote row.
    pub lead_source: String,
}

pub fn sanitize_payload(payload: WebhookPayloadDto) -> Result<SanitizedSubmission> {
    let cliente = payload
        .cliente
        .ok_or_else(|| AppError::Validation("objeto cliente é obrigatório".to_string()))?;
    let cotacao = payload
        .cotacao
        .ok_or_else(|| AppError::Validation("objeto cotacao é obrigatório".to_string()))?;

    let client = sanitize_client(cliente)?;
    let (quote, lead_source) = sanitize_quote(cotacao)?;

    Ok(SanitizedSubmission {
        client,
        quote,
        lead_source,
    })
}

fn sanitize_client(dto: ClientePayloadDto) -> Result<SanitizedClient> {
    let name = dto.nome.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::Validation("cliente.nome é obrigatório".to_string()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "cliente.nome deve ter no máximo {} caracteres",
            MAX_NAME_CHARS
        )));
    }

    let phone_raw = dto.telefone.as_deref().map(str::trim).unwrap_or_default();
    if phone_raw.is_empty() {
        return Err(AppError::Validation("cliente.telefone é obrigatório".to_string()));
    }
    let phone = normalize_phone(phone_raw).ok_or_else(|| {
        AppError::Validation(
            "cliente.telefone deve conter DDD e número (10 ou 11 dígitos)".to_string(),
        )
    })?;

    Ok(SanitizedClient {
        name: name.to_string(),
        phone,
        address: optional_text(dto.endereco, MAX_ADDRESS_CHARS),
        neighborhood: optional_text(dto.bairro, MAX_NEIGHBORHOOD_CHARS),
        postal_code: optional_digits(dto.cep, MAX_POSTAL_CODE_DIGITS),
    })
}

fn sanitize_quote(dto: CotacaoPayloadDto) -> Result<(SanitizedQuote, String)> {
    let service_types: Vec<String> = dto
        .tipo_servico
        .unwrap_or_default()
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| truncate_chars(s, MAX_SERVICE_TYPE_CHARS).to_string())
        .take(MAX_SERVICE_TYPES)
        .collect();

    if service_types.is_empty() {
        return Err(AppError::Validation(
            "cotacao.tipo_servico deve conter ao menos um serviço".to_string(),
        ));
    }

    let estimated_value = dto
        .valor_estimado
        .filter(|v| *v > 0.0)
        .map(|v| v.min(MAX_ESTIMATED_VALUE));

    let lead_source = optional_text(dto.origem_lead, MAX_LEAD_SOURCE_CHARS)
        .unwrap_or_else(|| DEFAULT_LEAD_SOURCE.to_string());

    let quote = SanitizedQuote {
        service_types,
        description: optional_text(dto.descricao, MAX_DESCRIPTION_CHARS),
        estimated_value,
        desired_date: optional_trimmed(dto.data_servico_desejada),
        start_time: optional_trimmed(dto.horario_inicio),
        end_time: optional_trimmed(dto.horario_fim),
        occasion: optional_text(dto.ocasiao, MAX_OCCASION_CHARS),
        observations: optional_text(dto.observacoes, MAX_OBSERVATIONS_CHARS),
    };

    Ok((quote, lead_source))
}

/// Trim, drop if empty, cap at `max` characters.
fn optional_text(value: Option<String>, max: usize) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(truncate_chars(trimmed, max).to_string())
        }
    })
}

/// Trim and drop if empty, without a length cap.
fn optional_trimmed(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Reduce to digits, drop if none remain, cap at `max` digits.
fn optional_digits(value: Option<String>, max: usize) -> Option<String> {
    value.and_then(|v| {
        let digits = digits_only(&v);
        if digits.is_empty() {
            None
        } else {
            Some(truncate_chars(&digits, max).to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_payload() -> WebhookPayloadDto {
        WebhookPayloadDto {
            cliente: Some(ClientePayloadDto {
                nome: Some("  Maria da Silva  ".into()),
                telefone: Some("(11) 99999-9999".into()),
                endereco: Some("Rua das Flores, 123".into()),
                bairro: Some("Centro".into()),
                cep: Some("01310-100".into()),
            }),
            cotacao: Some(CotacaoPayloadDto {
                tipo_servico: Some(vec!["eletrica".into(), " pintura ".into()]),
                descricao: Some("Troca de fiação".into()),
                valor_estimado: Some(350.0),
                data_servico_desejada: Some(" sexta de manhã ".into()),
                horario_inicio: Some("08:00".into()),
                horario_fim: Some("12:00".into()),
                origem_lead: None,
                ocasiao: Some("reforma".into()),
                observacoes: Some("portão azul".into()),
            }),
        }
    }

    #[test]
    fn test_happy_path() {
        let submission = sanitize_payload(base_payload()).unwrap();

        assert_eq!(submission.client.name, "Maria da Silva");
        assert_eq!(submission.client.phone, "11999999999");
        assert_eq!(submission.client.postal_code.as_deref(), Some("01310100"));
        assert_eq!(submission.quote.service_types, vec!["eletrica", "pintura"]);
        assert_eq!(submission.quote.estimated_value, Some(350.0));
        assert_eq!(submission.quote.desired_date.as_deref(), Some("sexta de manhã"));
        assert_eq!(submission.lead_source, DEFAULT_LEAD_SOURCE);
    }

    #[test]
    fn test_name_at_cap_passes_over_cap_rejects() {
        let mut payload = base_payload();
        payload.cliente.as_mut().unwrap().nome = Some("a".repeat(MAX_NAME_CHARS));
        assert!(sanitize_payload(payload).is_ok());

        let mut payload = base_payload();
        payload.cliente.as_mut().unwrap().nome = Some("a".repeat(MAX_NAME_CHARS + 1));
        let err = sanitize_payload(payload).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("no máximo 100"));
    }

    #[test]
    fn test_name_cap_counts_chars_after_trim() {
        // 101 raw chars, but only 99 after trimming: must pass
        let mut payload = base_payload();
        let padded = format!(" {} ", "ç".repeat(MAX_NAME_CHARS - 1));
        payload.cliente.as_mut().unwrap().nome = Some(padded);
        let submission = sanitize_payload(payload).unwrap();
        assert_eq!(submission.client.name.chars().count(), MAX_NAME_CHARS - 1);
    }

    #[test]
    fn test_whitespace_only_name_rejected() {
        let mut payload = base_payload();
        payload.cliente.as_mut().unwrap().nome = Some("   ".into());
        let err = sanitize_payload(payload).unwrap_err();
        assert!(err.to_string().contains("cliente.nome"));
    }

    #[test]
    fn test_phone_is_normalized() {
        let mut payload = base_payload();
        payload.cliente.as_mut().unwrap().telefone = Some("+55 (11) 98888-7777".into());
        let submission = sanitize_payload(payload).unwrap();
        assert_eq!(submission.client.phone, "11988887777");
    }

    #[test]
    fn test_phone_too_short_rejected() {
        let mut payload = base_payload();
        payload.cliente.as_mut().unwrap().telefone = Some("9999".into());
        let err = sanitize_payload(payload).unwrap_err();
        assert!(err.to_string().contains("cliente.telefone"));
    }

    #[test]
    fn test_service_types_dropped_when_blank() {
        let mut payload = base_payload();
        payload.cotacao.as_mut().unwrap().tipo_servico =
            Some(vec!["".into(), "  ".into(), "jardinagem".into()]);
        let submission = sanitize_payload(payload).unwrap();
        assert_eq!(submission.quote.service_types, vec!["jardinagem"]);
    }

    #[test]
    fn test_service_types_all_blank_rejected() {
        let mut payload = base_payload();
        payload.cotacao.as_mut().unwrap().tipo_servico = Some(vec!["".into(), "   ".into()]);
        let err = sanitize_payload(payload).unwrap_err();
        assert!(err.to_string().contains("tipo_servico"));
    }

    #[test]
    fn test_service_types_capped_at_ten_entries() {
        let mut payload = base_payload();
        payload.cotacao.as_mut().unwrap().tipo_servico =
            Some((0..15).map(|i| format!("servico-{i}")).collect());
        let submission = sanitize_payload(payload).unwrap();
        assert_eq!(submission.quote.service_types.len(), MAX_SERVICE_TYPES);
        assert_eq!(submission.quote.service_types[0], "servico-0");
    }

    #[test]
    fn test_service_type_entry_truncated() {
        let mut payload = base_payload();
        payload.cotacao.as_mut().unwrap().tipo_servico =
            Some(vec!["x".repeat(MAX_SERVICE_TYPE_CHARS + 20)]);
        let submission = sanitize_payload(payload).unwrap();
        assert_eq!(
            submission.quote.service_types[0].chars().count(),
            MAX_SERVICE_TYPE_CHARS
        );
    }

    #[test]
    fn test_estimated_value_bounds() {
        let mut payload = base_payload();
        payload.cotacao.as_mut().unwrap().valor_estimado = Some(-10.0);
        assert_eq!(sanitize_payload(payload).unwrap().quote.estimated_value, None);

        let mut payload = base_payload();
        payload.cotacao.as_mut().unwrap().valor_estimado = Some(0.0);
        assert_eq!(sanitize_payload(payload).unwrap().quote.estimated_value, None);

        let mut payload = base_payload();
        payload.cotacao.as_mut().unwrap().valor_estimado = Some(2_000_000.0);
        assert_eq!(
            sanitize_payload(payload).unwrap().quote.estimated_value,
            Some(MAX_ESTIMATED_VALUE)
        );
    }

    #[test]
    fn test_optional_fields_degrade_instead_of_rejecting() {
        let mut payload = base_payload();
        {
            let cliente = payload.cliente.as_mut().unwrap();
            cliente.endereco = Some("   ".into());
            cliente.bairro = Some("b".repeat(500));
            cliente.cep = Some("sem cep".into());
        }
        let submission = sanitize_payload(payload).unwrap();
        assert_eq!(submission.client.address, None);
        assert_eq!(
            submission.client.neighborhood.as_deref().map(|s| s.chars().count()),
            Some(MAX_NEIGHBORHOOD_CHARS)
        );
        assert_eq!(submission.client.postal_code, None);
    }

    #[test]
    fn test_cep_truncated_to_eight_digits() {
        let mut payload = base_payload();
        payload.cliente.as_mut().unwrap().cep = Some("01310-100-99".into());
        let submission = sanitize_payload(payload).unwrap();
        assert_eq!(submission.client.postal_code.as_deref(), Some("01310100"));
    }

    #[test]
    fn test_lead_source_defaults_to_chatbot() {
        let mut payload = base_payload();
        payload.cotacao.as_mut().unwrap().origem_lead = Some("  ".into());
        assert_eq!(sanitize_payload(payload).unwrap().lead_source, DEFAULT_LEAD_SOURCE);

        let mut payload = base_payload();
        payload.cotacao.as_mut().unwrap().origem_lead = Some(" site ".into());
        assert_eq!(sanitize_payload(payload).unwrap().lead_source, "site");
    }

    #[test]
    fn test_missing_blocks_rejected() {
        let payload = WebhookPayloadDto {
            cliente: None,
            ..base_payload()
        };
        assert!(sanitize_payload(payload)
            .unwrap_err()
            .to_string()
            .contains("objeto cliente"));

        let payload = WebhookPayloadDto {
            cotacao: None,
            ..base_payload()
        };
        assert!(sanitize_payload(payload)
            .unwrap_err()
            .to_string()
            .contains("objeto cotacao"));
    }

    #[test]
    fn test_observations_and_description_caps() {
        let mut payload = base_payload();
        {
            let cotacao = payload.cotacao.as_mut().unwrap();
            cotacao.descricao = Some("d".repeat(MAX_DESCRIPTION_CHARS + 100));
            cotacao.observacoes = Some("o".repeat(MAX_OBSERVATIONS_CHARS + 100));
            cotacao.ocasiao = Some("c".repeat(MAX_OCCASION_CHARS + 100));
        }
        let submission = sanitize_payload(payload).unwrap();
        assert_eq!(
            submission.quote.description.as_deref().map(str::len),
            Some(MAX_DESCRIPTION_CHARS)
        );
        assert_eq!(
            submission.quote.observations.as_deref().map(str::len),
            Some(MAX_OBSERVATIONS_CHARS)
        );
        assert_eq!(
            submission.quote.occasion.as_deref().map(str::len),
            Some(MAX_OCCASION_CHARS)
        );
    }
}
