use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Transport route offered by a transporter
#[derive(Debug, Clone, Serialize, FromRow, ToSchema, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub transporter_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 255))]
    pub origin: String,
    #[validate(length(min = 1, max = 255))]
    pub destination: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRouteRequest {
    #[validate(length(min = 1, max = 255))]
    pub origin: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub destination: Option<String>,
}

/// Query parameters for listing routes
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RouteFilter {
    pub transporter_id: Option<Uuid>,
    /// Case-insensitive substring match on origin or destination
    pub search: Option<String>,
}

/// Query parameters for the common-routes lookup
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommonRoutesQuery {
    pub first: Uuid,
    pub second: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RouteStats {
    pub total_routes: i64,
    pub total_transporters: i64,
}

/// Aggregate view of the transport network
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteNetwork {
    pub total_routes: i64,
    pub unique_origins: i64,
    pub unique_destinations: i64,
    pub total_locations: i64,
    pub locations: Vec<String>,
}
