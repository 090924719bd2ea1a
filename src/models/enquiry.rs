use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Enquiry lifecycle states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "varchar")]
pub enum EnquiryStatus {
    Pending,
    Accepted,
    Rejected,
    Negotiating,
}

impl EnquiryStatus {
    pub const ALL: [EnquiryStatus; 4] = [
        EnquiryStatus::Pending,
        EnquiryStatus::Accepted,
        EnquiryStatus::Rejected,
        EnquiryStatus::Negotiating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Negotiating => "Negotiating",
        }
    }
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EnquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Accepted" => Ok(Self::Accepted),
            "Rejected" => Ok(Self::Rejected),
            "Negotiating" => Ok(Self::Negotiating),
            _ => Err(format!("Unknown enquiry status: {}", s)),
        }
    }
}

/// Buyer interest in a product, optionally with a counter-offer
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Enquiry {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub product_id: Uuid,
    pub quantity: f64,
    pub offered_price: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEnquiryRequest {
    pub product_id: Uuid,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    pub offered_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEnquiryRequest {
    #[validate(range(min = 0.0))]
    pub quantity: Option<f64>,
    pub offered_price: Option<Decimal>,
    pub status: Option<String>,
}

/// Seller response to an enquiry. Either field may be omitted; a
/// message requires the content text.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RespondToEnquiryRequest {
    pub status: Option<String>,
    pub message: Option<String>,
}

/// Query parameters for listing enquiries
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EnquiryFilter {
    pub buyer_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnquiryStats {
    pub total_enquiries: i64,
    pub pending_enquiries: i64,
    pub accepted_enquiries: i64,
    pub rejected_enquiries: i64,
    pub negotiating_enquiries: i64,
    pub average_offered_price: Option<Decimal>,
    pub average_quantity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in EnquiryStatus::ALL {
            assert_eq!(status.as_str().parse::<EnquiryStatus>().unwrap(), status);
        }
        assert!("Closed".parse::<EnquiryStatus>().is_err());
    }
}
