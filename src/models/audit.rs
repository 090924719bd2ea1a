use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Immutable record of a state-changing action
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for listing audit logs
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AuditLogFilter {
    pub user_id: Option<Uuid>,
    /// Case-insensitive substring match on the action name
    pub action: Option<String>,
}
