pub mod client;
pub mod quote;

pub use client::Client;
pub use quote::{Quote, QUOTE_STATUS_PENDING};
