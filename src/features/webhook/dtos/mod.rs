pub mod webhook_dto;

pub use webhook_dto::{ClientePayloadDto, CotacaoPayloadDto, QuoteAcceptedDto, WebhookPayloadDto};
