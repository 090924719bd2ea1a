//! JWT encoding and validation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::auth::{Claims, TokenPair, TokenType};
use crate::error::{ApiError, ErrorCode, Result};

/// Service for issuing and validating JWT tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime_secs: i64,
    refresh_lifetime_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_lifetime_secs: i64, refresh_lifetime_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_lifetime_secs,
            refresh_lifetime_secs,
        }
    }

    /// Issue an access/refresh token pair for a user
    pub fn generate_token_pair(
        &self,
        user_id: Uuid,
        username: &str,
        role: &str,
    ) -> Result<TokenPair> {
        let access = self.encode_token(&Claims::new(
            user_id,
            username.to_string(),
            role.to_string(),
            TokenType::Access,
            self.access_lifetime_secs,
        ))?;
        let refresh = self.encode_token(&Claims::new(
            user_id,
            username.to_string(),
            role.to_string(),
            TokenType::Refresh,
            self.refresh_lifetime_secs,
        ))?;

        Ok(TokenPair { access, refresh })
    }

    pub fn encode_token(&self, claims: &Claims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to encode token: {}", e)))
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    ApiError::with_code(ErrorCode::TokenExpired, "Token has expired")
                }
                _ => ApiError::with_code(ErrorCode::TokenInvalid, "Invalid token"),
            })
    }

    /// Validate a refresh token and issue a fresh access token
    pub fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        let claims = self.decode_token(refresh_token)?;

        if !claims.is_refresh() {
            return Err(ApiError::with_code(
                ErrorCode::TokenInvalid,
                "Refresh token required",
            ));
        }

        self.encode_token(&Claims::new(
            claims.sub,
            claims.username,
            claims.role,
            TokenType::Access,
            self.access_lifetime_secs,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-for-unit-tests", 3600, 604800)
    }

    #[test]
    fn test_token_round_trip() {
        let svc = service();
        let user_id = Uuid::new_v4();

        let pair = svc.generate_token_pair(user_id, "alice", "Seller").unwrap();
        let claims = svc.decode_token(&pair.access).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "Seller");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_refresh_flow() {
        let svc = service();
        let pair = svc
            .generate_token_pair(Uuid::new_v4(), "bob", "Buyer")
            .unwrap();

        let access = svc.refresh_access_token(&pair.refresh).unwrap();
        let claims = svc.decode_token(&access).unwrap();
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_access_token_rejected_for_refresh() {
        let svc = service();
        let pair = svc
            .generate_token_pair(Uuid::new_v4(), "bob", "Buyer")
            .unwrap();

        assert!(svc.refresh_access_token(&pair.access).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let svc = service();
        let other = JwtService::new("another-secret", 3600, 604800);
        let pair = svc
            .generate_token_pair(Uuid::new_v4(), "eve", "Admin")
            .unwrap();

        assert!(other.decode_token(&pair.access).is_err());
    }
}
