use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod roles;

pub use roles::{Permission, Role};

/// User claims for JWT tokens
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    pub username: String,
    /// User role (Buyer, Seller, Transporter, Admin)
    pub role: String,
    /// "access" or "refresh"
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

impl Claims {
    pub fn new(
        user_id: Uuid,
        username: String,
        role: String,
        token_type: TokenType,
        lifetime_secs: i64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + chrono::Duration::seconds(lifetime_secs);

        Self {
            sub: user_id,
            username,
            role,
            token_type: token_type.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: "tivra-api".to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == TokenType::Refresh.as_str()
    }

    pub fn has_role(&self, required_role: &str) -> bool {
        self.role == required_role
    }

    pub fn has_any_role(&self, required_roles: &[&str]) -> bool {
        required_roles.contains(&self.role.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// Access/refresh token pair issued at registration and login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expiration() {
        let claims = Claims::new(
            Uuid::new_v4(),
            "test_user".to_string(),
            "Buyer".to_string(),
            TokenType::Access,
            3600,
        );

        assert!(!claims.is_expired());
        assert!(!claims.is_refresh());
        assert!(claims.has_role("Buyer"));
        assert!(!claims.has_role("Admin"));
        assert!(claims.has_any_role(&["Buyer", "Seller"]));
    }

    #[test]
    fn test_refresh_claims() {
        let claims = Claims::new(
            Uuid::new_v4(),
            "test_user".to_string(),
            "Seller".to_string(),
            TokenType::Refresh,
            604800,
        );

        assert!(claims.is_refresh());
        assert_eq!(claims.token_type, "refresh");
    }
}
