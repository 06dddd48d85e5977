use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Status every webhook-created quote starts in. Later transitions happen in
/// the back office, not here.
pub const QUOTE_STATUS_PENDING: &str = "pendente";

/// A service quote submitted through the chat assistant.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Quote {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub client_id: Uuid,
    pub service_types: Vec<String>,
    pub description: Option<String>,
    pub observations: Option<String>,
    pub occasion: Option<String>,
    pub estimated_value: Option<Decimal>,
    /// Free-form date/time hints as the customer phrased them; scheduling is
    /// normalized downstream, not at ingestion.
    pub desired_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub lead_source: String,
    pub status: String,
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
