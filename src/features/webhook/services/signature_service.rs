//! Signature Service - HMAC authentication for webhook callers

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::core::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Verifies the HMAC-SHA256 digest a caller supplies over the raw request body.
///
/// The secret is optional so a deployment without one still boots; every
/// verification then fails with the configuration error until it is set.
pub struct SignatureVerifier {
    secret: Option<String>,
}

impl SignatureVerifier {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    /// Check `supplied` against the digest of `body`.
    ///
    /// `supplied` is lowercase or uppercase hex, with or without a `sha256=`
    /// prefix. Comparison happens in constant time; the raw bytes must be the
    /// exact bytes received on the wire, before any JSON parsing.
    pub fn verify(&self, body: &[u8], supplied: Option<&str>) -> Result<()> {
        let secret = self.secret.as_deref().ok_or(AppError::MissingSecret)?;

        let supplied = supplied
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(AppError::MissingSignature)?;

        let hex_digest = supplied.strip_prefix("sha256=").unwrap_or(supplied);
        let expected = hex::decode(hex_digest).map_err(|_| AppError::InvalidSignature)?;

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| AppError::Internal(format!("failed to initialize HMAC: {}", e)))?;
        mac.update(body);
        mac.verify_slice(&expected)
            .map_err(|_| AppError::InvalidSignature)
    }

    /// Hex digest of `body` under the configured secret.
    #[allow(dead_code)]
    pub fn sign(&self, body: &[u8]) -> Option<String> {
        let secret = self.secret.as_deref()?;
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
        mac.update(body);
        Some(hex::encode(mac.finalize().into_bytes()))
    }
}
