use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::TokenPair;

/// Marketplace user account
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration request. Profile fields are mandatory so that every
/// account starts with KYC information attached.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: String,
    pub gst_number: String,
    pub kyc_document: String,
    pub location: String,
    pub contact_info: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Issued on successful registration and login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
    pub token: TokenPair,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}

/// Admin-created account, without the KYC profile registration requires
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: String,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_verified: Option<bool>,
}

/// Query parameters for listing users
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserFilter {
    pub role: Option<String>,
    pub is_verified: Option<bool>,
    /// Case-insensitive substring match on username or email
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserStats {
    pub total_users: i64,
    pub verified_users: i64,
    pub unverified_users: i64,
    pub role_stats: HashMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_response_shape() {
        let user_id = Uuid::new_v4();
        let response = AuthResponse {
            user_id,
            email: "seller@example.com".to_string(),
            role: "Seller".to_string(),
            token: TokenPair {
                access: "acc".to_string(),
                refresh: "ref".to_string(),
            },
        };

        // Registration and login both serialize this body at the top
        // level, so the field layout is pinned here.
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "user_id": user_id,
                "email": "seller@example.com",
                "role": "Seller",
                "token": {"access": "acc", "refresh": "ref"}
            })
        );
    }
}
