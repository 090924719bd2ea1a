use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// KYC profile attached to a user account
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub gst_number: String,
    pub kyc_document: String,
    pub location: String,
    pub contact_info: String,
    pub rating: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 50))]
    pub gst_number: String,
    pub kyc_document: String,
    pub location: String,
    pub contact_info: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50))]
    pub gst_number: Option<String>,
    pub kyc_document: Option<String>,
    pub location: Option<String>,
    pub contact_info: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

/// Query parameters for listing profiles
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProfileFilter {
    pub user_id: Option<Uuid>,
    /// Case-insensitive substring match on location
    pub location: Option<String>,
    pub gst_number: Option<String>,
}
