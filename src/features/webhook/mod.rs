//! Inbound quote webhook for the chat assistant integration.
//!
//! A single endpoint receives customer and quote data collected during a
//! WhatsApp conversation, authenticates the caller by HMAC signature, bounds
//! the payload, and writes a client record plus a quote row.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/webhook/cotacao` | HMAC signature | Register a client and a quote |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sanitize;
pub mod services;

pub use services::{ClientService, FixedWindowRateLimiter, QuoteService, RateLimiter, SignatureVerifier};
