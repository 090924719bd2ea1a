//! Registration, login, and token refresh.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::AppState;
use crate::auth::Role;
use crate::auth::password::PasswordService;
use crate::database::queries;
use crate::error::{ApiError, ErrorCode, Result};
use crate::extractors::Json;
use crate::models::{
    AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, User,
};
use crate::services::AuditEvent;
use crate::utils::validate_request;

/// Register a new account with its KYC profile
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    validate_request(&req)?;

    let role: Role = req
        .role
        .parse()
        .map_err(|_| ApiError::with_code(ErrorCode::InvalidRole, format!("Invalid role: {}", req.role)))?;

    if queries::users::find_by_email(&state.db, &req.email)
        .await?
        .is_some()
    {
        return Err(ApiError::already_exists("Email"));
    }

    let password_hash = PasswordService::new().hash_password(&req.password)?;

    // User and profile land together or not at all
    let mut tx = state.db.begin().await?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, role)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(&req.username)
    .bind(&req.email)
    .bind(&password_hash)
    .bind(role.as_str())
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO profiles (user_id, gst_number, kyc_document, location, contact_info)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user.id)
    .bind(&req.gst_number)
    .bind(&req.kyc_document)
    .bind(&req.location)
    .bind(&req.contact_info)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let token = state
        .jwt_service
        .generate_token_pair(user.id, &user.username, &user.role)?;

    state.audit_logger.log_async(AuditEvent::UserRegistered {
        user_id: user.id,
        role: user.role.clone(),
    });
    info!(user_id = %user.id, role = %user.role, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: user.id,
            email: user.email,
            role: user.role,
            token,
        }),
    ))
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = queries::users::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(ApiError::invalid_credentials)?;

    let valid = PasswordService::new().verify_password(&req.password, &user.password_hash)?;
    if !valid {
        state.audit_logger.log_async(AuditEvent::LoginFailed {
            user_id: user.id,
            email: user.email.clone(),
        });
        return Err(ApiError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token_pair(user.id, &user.username, &user.role)?;

    state
        .audit_logger
        .log_async(AuditEvent::UserLogin { user_id: user.id });
    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        user_id: user.id,
        email: user.email,
        role: user.role,
        token,
    }))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token issued", body = RefreshResponse),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let access = state.jwt_service.refresh_access_token(&req.refresh)?;
    Ok(Json(RefreshResponse { access }))
}
