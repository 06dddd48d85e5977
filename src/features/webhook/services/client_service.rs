//! Client Service - phone-keyed client resolution

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::webhook::models::Client;
use crate::features::webhook::sanitize::SanitizedClient;

/// Resolves submissions to client records, creating one on first contact.
pub struct ClientService {
    pool: PgPool,
}

/// Resolution outcome: the record id plus whether this call created it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedClient {
    pub id: Uuid,
    pub created: bool,
}

impl ClientService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the client with this normalized phone inside the tenant, or insert
    /// a new record.
    ///
    /// Two first-time submissions for the same phone can race past the lookup;
    /// the unique index on (tenant_id, phone) turns the losing insert into a
    /// re-read, so both callers resolve to the same record.
    pub async fn resolve_or_create(
        &self,
        tenant_id: Uuid,
        client: &SanitizedClient,
        lead_source: &str,
    ) -> Result<ResolvedClient> {
        if let Some(id) = self.find_by_phone(tenant_id, &client.phone).await? {
            return Ok(ResolvedClient { id, created: false });
        }

        let inserted = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (
                tenant_id, phone, name,
                address, neighborhood, postal_code,
                lead_source, active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(&client.phone)
        .bind(&client.name)
        .bind(&client.address)
        .bind(&client.neighborhood)
        .bind(&client.postal_code)
        .bind(lead_source)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(record) => {
                tracing::info!("Client created: id={}, tenant={}", record.id, tenant_id);
                Ok(ResolvedClient {
                    id: record.id,
                    created: true,
                })
            }
            Err(e) if is_unique_violation(&e) => {
                // Lost the insert race; the winning row is the one we want
                let id = self
                    .find_by_phone(tenant_id, &client.phone)
                    .await?
                    .ok_or(AppError::ClientInsert(e))?;
                Ok(ResolvedClient { id, created: false })
            }
            Err(e) => {
                tracing::error!("Failed to insert client: {:?}", e);
                Err(AppError::ClientInsert(e))
            }
        }
    }

    async fn find_by_phone(&self, tenant_id: Uuid, phone: &str) -> Result<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM clients WHERE tenant_id = $1 AND phone = $2",
        )
        .bind(tenant_id)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up client by phone: {:?}", e);
            AppError::ClientLookup(e)
        })
    }
}
