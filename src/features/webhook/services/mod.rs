mod client_service;
mod quote_service;
mod rate_limit_service;
mod signature_service;

pub use client_service::{ClientService, ResolvedClient};
pub use quote_service::QuoteService;
pub use rate_limit_service::{FixedWindowRateLimiter, RateLimitDecision, RateLimiter};
pub use signature_service::SignatureVerifier;
