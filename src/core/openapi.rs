use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::webhook::{dtos as webhook_dtos, handlers as webhook_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Webhook (signature-authenticated)
        webhook_handlers::webhook_handler::receive_quote,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Webhook
            webhook_dtos::WebhookPayloadDto,
            webhook_dtos::ClientePayloadDto,
            webhook_dtos::CotacaoPayloadDto,
            webhook_dtos::QuoteAcceptedDto,
        )
    ),
    tags(
        (name = "webhook", description = "Inbound quote submissions from the chat assistant"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Cotação Webhook API",
        version = "0.1.0",
        description = "Webhook de ingestão de cotações",
    )
)]
pub struct ApiDoc;

/// Adds the signature header security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "webhook_signature",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Webhook-Signature"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
