//! Quote Service - persistence of accepted submissions

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::webhook::models::{Quote, QUOTE_STATUS_PENDING};
use crate::features::webhook::sanitize::SanitizedQuote;

/// Writes quote rows. The webhook only inserts; status transitions belong to
/// the back office.
pub struct QuoteService {
    pool: PgPool,
}

impl QuoteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a quote for `client_id`, honoring `idempotency_key` when the
    /// caller supplies one: a key already stored for this tenant returns the
    /// existing quote id instead of writing a second row.
    pub async fn create(
        &self,
        tenant_id: Uuid,
        client_id: Uuid,
        quote: &SanitizedQuote,
        lead_source: &str,
        idempotency_key: Option<&str>,
    ) -> Result<Uuid> {
        if let Some(key) = idempotency_key {
            if let Some(existing) = self.find_by_idempotency_key(tenant_id, key).await? {
                tracing::info!("Quote replayed by idempotency key: id={}", existing);
                return Ok(existing);
            }
        }

        // NUMERIC column; the sanitizer already bounded the value
        let estimated_value = quote
            .estimated_value
            .and_then(|v| Decimal::try_from(v).ok());

        let inserted = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (
                tenant_id, client_id, service_types,
                description, observations, occasion,
                estimated_value, desired_date, start_time, end_time,
                lead_source, status, idempotency_key
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(client_id)
        .bind(&quote.service_types)
        .bind(&quote.description)
        .bind(&quote.observations)
        .bind(&quote.occasion)
        .bind(estimated_value)
        .bind(&quote.desired_date)
        .bind(&quote.start_time)
        .bind(&quote.end_time)
        .bind(lead_source)
        .bind(QUOTE_STATUS_PENDING)
        .bind(idempotency_key)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(record) => {
                tracing::info!(
                    "Quote created: id={}, client={}, services={}",
                    record.id,
                    client_id,
                    record.service_types.len()
                );
                Ok(record.id)
            }
            Err(e) if is_unique_violation(&e) => match idempotency_key {
                // A concurrent replay won the insert; hand back its row
                Some(key) => self
                    .find_by_idempotency_key(tenant_id, key)
                    .await?
                    .ok_or(AppError::QuoteInsert(e)),
                None => {
                    tracing::error!("Failed to insert quote: {:?}", e);
                    Err(AppError::QuoteInsert(e))
                }
            },
            Err(e) => {
                tracing::error!("Failed to insert quote: {:?}", e);
                Err(AppError::QuoteInsert(e))
            }
        }
    }

    async fn find_by_idempotency_key(&self, tenant_id: Uuid, key: &str) -> Result<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM quotes WHERE tenant_id = $1 AND idempotency_key = $2",
        )
        .bind(tenant_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up quote by idempotency key: {:?}", e);
            AppError::QuoteInsert(e)
        })
    }
}
