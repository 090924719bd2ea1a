use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Payment record for a delivered order. One transaction per order.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub invoice_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub order_id: Uuid,
    pub amount: Decimal,
    pub invoice_number: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    pub amount: Option<Decimal>,
    pub invoice_number: Option<String>,
}

/// Query parameters for listing transactions
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TransactionFilter {
    pub order_id: Option<Uuid>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionStats {
    pub total_transactions: i64,
    pub total_amount: Option<Decimal>,
    pub average_amount: Option<Decimal>,
}
