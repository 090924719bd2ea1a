use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Negotiation message attached to an enquiry thread
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub enquiry_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMessageRequest {
    pub enquiry_id: Uuid,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMessageRequest {
    #[validate(length(min = 1))]
    pub content: Option<String>,
}

/// Query parameters for listing messages
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MessageFilter {
    pub enquiry_id: Option<Uuid>,
    pub sender_id: Option<Uuid>,
}
