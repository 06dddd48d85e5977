//! Webhook routes

use axum::{routing::any, Router};

use crate::features::webhook::handlers;
use crate::features::webhook::handlers::WebhookState;

/// Create routes for the webhook feature
///
/// The endpoint is registered for every method so non-POST callers receive
/// the endpoint's own 405 envelope instead of the router default.
pub fn routes(state: WebhookState) -> Router {
    Router::new()
        .route("/api/webhook/cotacao", any(handlers::receive_quote))
        .with_state(state)
}
