use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Delivery lifecycle states. "In Transit" keeps its space in the
/// database and on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "varchar")]
pub enum OrderStatus {
    Requested,
    Picked,
    #[sqlx(rename = "In Transit")]
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Requested,
        OrderStatus::Picked,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::Picked => "Picked",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Requested" => Ok(Self::Requested),
            "Picked" => Ok(Self::Picked),
            "In Transit" => Ok(Self::InTransit),
            "Delivered" => Ok(Self::Delivered),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// Delivery order created from an accepted enquiry. The transporter
/// slot stays empty until a transporter claims the job.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub enquiry_id: Uuid,
    pub transporter_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub enquiry_id: Uuid,
    pub transporter_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub transporter_id: Option<Uuid>,
    pub status: Option<String>,
}

/// Query parameters for listing orders
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderFilter {
    pub enquiry_id: Option<Uuid>,
    pub transporter_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderStats {
    pub total_orders: i64,
    pub requested_orders: i64,
    pub picked_orders: i64,
    pub in_transit_orders: i64,
    pub delivered_orders: i64,
    pub available_jobs: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_in_transit_serde_rename() {
        let json = serde_json::to_string(&OrderStatus::InTransit).unwrap();
        assert_eq!(json, "\"In Transit\"");

        let parsed: OrderStatus = serde_json::from_str("\"In Transit\"").unwrap();
        assert_eq!(parsed, OrderStatus::InTransit);
    }
}
