use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Commodities traded on the platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "varchar")]
pub enum CommodityType {
    Biomass,
    Briquettes,
    Biodiesel,
}

impl CommodityType {
    pub const ALL: [CommodityType; 3] = [
        CommodityType::Biomass,
        CommodityType::Briquettes,
        CommodityType::Biodiesel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Biomass => "Biomass",
            Self::Briquettes => "Briquettes",
            Self::Biodiesel => "Biodiesel",
        }
    }
}

impl std::fmt::Display for CommodityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CommodityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Biomass" => Ok(Self::Biomass),
            "Briquettes" => Ok(Self::Briquettes),
            "Biodiesel" => Ok(Self::Biodiesel),
            _ => Err(format!("Unknown commodity type: {}", s)),
        }
    }
}

/// Commodity listing published by a seller
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub commodity_type: String,
    pub quantity: f64,
    pub price: Decimal,
    pub unit_of_measure: String,
    pub availability_dates: String,
    pub pickup_location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    pub commodity_type: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    pub price: Decimal,
    #[validate(length(min = 1, max = 20))]
    pub unit_of_measure: String,
    pub availability_dates: String,
    pub pickup_location: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    pub commodity_type: Option<String>,
    #[validate(range(min = 0.0))]
    pub quantity: Option<f64>,
    pub price: Option<Decimal>,
    #[validate(length(min = 1, max = 20))]
    pub unit_of_measure: Option<String>,
    pub availability_dates: Option<String>,
    pub pickup_location: Option<String>,
}

/// Query parameters for listing products
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductFilter {
    pub commodity_type: Option<String>,
    pub seller_id: Option<Uuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring match on pickup location
    pub location: Option<String>,
    /// Case-insensitive substring match on commodity type or pickup location
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductStats {
    pub total_products: i64,
    pub total_sellers: i64,
    pub commodity_stats: HashMap<String, i64>,
    pub average_price: Option<Decimal>,
    pub total_quantity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commodity_round_trip() {
        for commodity in CommodityType::ALL {
            assert_eq!(
                commodity.as_str().parse::<CommodityType>().unwrap(),
                commodity
            );
        }
        assert!("Coal".parse::<CommodityType>().is_err());
    }
}
