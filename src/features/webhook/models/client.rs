use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer record, keyed by normalized phone within a tenant.
///
/// The webhook only ever inserts; edits happen through the back office.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Client {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Bare digits, DDD plus number. The tenant+phone pair is unique.
    pub phone: String,
    pub name: String,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub postal_code: Option<String>,
    /// Channel that first brought this client in (defaults to "chatbot").
    pub lead_source: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
