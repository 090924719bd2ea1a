use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::auth::{Claims, Permission, Role};
use crate::error::{ApiError, ErrorCode};

/// JWT authentication middleware.
///
/// Expects a `Bearer` access token in the Authorization header and
/// stores the decoded claims in request extensions for handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = match auth_header {
        Some(auth_value) if auth_value.starts_with("Bearer ") => &auth_value[7..],
        _ => {
            return ApiError::with_code(
                ErrorCode::TokenMissing,
                "Missing or invalid Authorization header",
            )
            .into_response();
        }
    };

    match state.jwt_service.decode_token(token) {
        Ok(claims) => {
            // Refresh tokens are only valid at the refresh endpoint
            if claims.is_refresh() {
                return ApiError::with_code(
                    ErrorCode::TokenInvalid,
                    "Access token required",
                )
                .into_response();
            }
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Role-based authorization middleware for admin access
pub async fn require_admin_role(
    user: AuthenticatedUser,
    request: Request<Body>,
    next: Next,
) -> Response {
    match user.role() {
        Ok(Role::Admin) => next.run(request).await,
        Ok(_) => ApiError::with_code(
            ErrorCode::RoleNotAuthorized,
            "Admin access required",
        )
        .into_response(),
        Err(err) => err.into_response(),
    }
}

/// Extractor for authenticated user claims
#[derive(Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    /// Parse the role carried in the claims
    pub fn role(&self) -> crate::error::Result<Role> {
        self.0
            .role
            .parse::<Role>()
            .map_err(|_| ApiError::with_code(ErrorCode::InvalidRole, "Invalid user role"))
    }

    /// Reject unless the user's role grants `permission`
    pub fn require_permission(&self, permission: &Permission) -> crate::error::Result<Role> {
        let role = self.role()?;
        if role.has_permission(permission) {
            Ok(role)
        } else {
            Err(ApiError::with_code(
                ErrorCode::RoleNotAuthorized,
                "Your role is not authorized for this action",
            ))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("No authentication found".to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenType;
    use uuid::Uuid;

    fn user_with_role(role: &str) -> AuthenticatedUser {
        AuthenticatedUser(Claims::new(
            Uuid::new_v4(),
            "tester".to_string(),
            role.to_string(),
            TokenType::Access,
            3600,
        ))
    }

    #[test]
    fn test_require_permission() {
        let seller = user_with_role("Seller");
        assert!(
            seller
                .require_permission(&Permission::new("products", "create"))
                .is_ok()
        );
        assert!(
            seller
                .require_permission(&Permission::new("routes", "create"))
                .is_err()
        );

        let admin = user_with_role("Admin");
        assert_eq!(
            admin
                .require_permission(&Permission::new("users", "delete"))
                .unwrap(),
            Role::Admin
        );
    }

    #[test]
    fn test_invalid_role_rejected() {
        let bogus = user_with_role("Wholesaler");
        assert!(bogus.role().is_err());
        assert!(
            bogus
                .require_permission(&Permission::new("products", "read"))
                .is_err()
        );
    }
}
