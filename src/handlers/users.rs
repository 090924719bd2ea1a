//! Admin-only user management endpoints.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::auth::Role;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::password::PasswordService;
use crate::database::queries;
use crate::error::{ApiError, ErrorCode, Result};
use crate::extractors::Json;
use crate::handlers::response::{Created, ListResponse, NoContent};
use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserFilter, UserStats};
use crate::services::AuditEvent;
use crate::utils::validate_request;

/// List user accounts
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "User accounts", body = ListResponse<User>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<ListResponse<User>>> {
    let users = queries::users::list(&state.db, &filter).await?;
    Ok(Json(ListResponse::new(users)))
}

/// Aggregate user counts by verification and role
#[utoipa::path(
    get,
    path = "/api/users/stats",
    tag = "users",
    responses(
        (status = 200, description = "User statistics", body = UserStats)
    ),
    security(("bearer_auth" = []))
)]
pub async fn user_stats(State(state): State<AppState>) -> Result<Json<UserStats>> {
    let stats = queries::users::stats(&state.db).await?;
    Ok(Json(stats))
}

/// Fetch one user account
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User account", body = User),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>> {
    let user = queries::users::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;
    Ok(Json(user))
}

/// Create a user account directly, bypassing registration
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Email already registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    validate_request(&req)?;
    let role: Role = req.role.parse().map_err(|_| {
        ApiError::with_code(ErrorCode::InvalidRole, format!("Invalid role: {}", req.role))
    })?;

    if queries::users::find_by_email(&state.db, &req.email)
        .await?
        .is_some()
    {
        return Err(ApiError::already_exists("Email"));
    }

    let password_hash = PasswordService::new().hash_password(&req.password)?;
    let created = queries::users::insert(&state.db, &req, role, &password_hash).await?;

    state.audit_logger.log_async(AuditEvent::AdminAction {
        user_id: user.0.sub,
        action: "create_user".to_string(),
        target_user_id: Some(created.id),
    });

    Ok(Created(created))
}

/// Update a user account
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    validate_request(&req)?;
    if let Some(role) = &req.role {
        role.parse::<Role>().map_err(|_| {
            ApiError::with_code(ErrorCode::InvalidRole, format!("Invalid role: {}", role))
        })?;
    }

    let updated = queries::users::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    state.audit_logger.log_async(AuditEvent::AdminAction {
        user_id: user.0.sub,
        action: "update_user".to_string(),
        target_user_id: Some(id),
    });

    Ok(Json(updated))
}

/// Delete a user account and its dependent records
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<NoContent> {
    let deleted = queries::users::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::not_found("User"));
    }

    state.audit_logger.log_async(AuditEvent::AdminAction {
        user_id: user.0.sub,
        action: "delete_user".to_string(),
        target_user_id: Some(id),
    });

    Ok(NoContent)
}
