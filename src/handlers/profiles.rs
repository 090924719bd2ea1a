//! KYC profile endpoints. Any authenticated user may read profiles;
//! users modify their own, admins modify anyone's.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::auth::Role;
use crate::auth::middleware::AuthenticatedUser;
use crate::database::queries;
use crate::error::{ApiError, ErrorCode, Result};
use crate::extractors::Json;
use crate::handlers::response::{Created, ListResponse, NoContent};
use crate::models::{CreateProfileRequest, Profile, ProfileFilter, UpdateProfileRequest};
use crate::utils::validate_request;

fn ensure_owner_or_admin(user: &AuthenticatedUser, owner_id: Uuid) -> Result<()> {
    if user.0.sub == owner_id || user.role()? == Role::Admin {
        Ok(())
    } else {
        Err(ApiError::with_code(
            ErrorCode::InsufficientPermissions,
            "You can only modify your own profile",
        ))
    }
}

/// List profiles
#[utoipa::path(
    get,
    path = "/api/profiles",
    tag = "profiles",
    responses((status = 200, description = "Profiles", body = ListResponse<Profile>)),
    security(("bearer_auth" = []))
)]
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(filter): Query<ProfileFilter>,
) -> Result<Json<ListResponse<Profile>>> {
    let profiles = queries::profiles::list(&state.db, &filter).await?;
    Ok(Json(ListResponse::new(profiles)))
}

/// Fetch one profile
#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    tag = "profiles",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>> {
    let profile = queries::profiles::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile"))?;
    Ok(Json(profile))
}

/// Create a profile for a user that does not have one yet
#[utoipa::path(
    post,
    path = "/api/profiles",
    tag = "profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = Profile),
        (status = 409, description = "User already has a profile")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse> {
    validate_request(&req)?;
    ensure_owner_or_admin(&user, req.user_id)?;

    if queries::profiles::find_by_user(&state.db, req.user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::already_exists("Profile"));
    }
    if queries::users::find_by_id(&state.db, req.user_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("User"));
    }

    let profile = queries::profiles::insert(&state.db, &req).await?;
    Ok(Created(profile))
}

/// Update a profile
#[utoipa::path(
    patch,
    path = "/api/profiles/{id}",
    tag = "profiles",
    params(("id" = Uuid, Path, description = "Profile ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>> {
    validate_request(&req)?;

    let existing = queries::profiles::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile"))?;
    ensure_owner_or_admin(&user, existing.user_id)?;

    let profile = queries::profiles::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile"))?;
    Ok(Json(profile))
}

/// Delete a profile
#[utoipa::path(
    delete,
    path = "/api/profiles/{id}",
    tag = "profiles",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<NoContent> {
    let existing = queries::profiles::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile"))?;
    ensure_owner_or_admin(&user, existing.user_id)?;

    queries::profiles::delete(&state.db, id).await?;
    Ok(NoContent)
}
