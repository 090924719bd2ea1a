//! Enquiry endpoints, including the seller response action that can
//! move the status and append a negotiation message in one call.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::auth::Permission;
use crate::auth::middleware::AuthenticatedUser;
use crate::database::queries;
use crate::error::{ApiError, ErrorCode, Result};
use crate::extractors::Json;
use crate::handlers::response::{Created, ListResponse, NoContent};
use crate::models::{
    CreateEnquiryRequest, Enquiry, EnquiryFilter, EnquiryStats, EnquiryStatus,
    RespondToEnquiryRequest, UpdateEnquiryRequest,
};
use crate::services::AuditEvent;
use crate::utils::validate_request;

fn parse_status(value: &str) -> Result<EnquiryStatus> {
    value.parse().map_err(|_| {
        ApiError::with_code(
            ErrorCode::InvalidStatus,
            format!("Unknown enquiry status: {}", value),
        )
    })
}

/// List enquiries
#[utoipa::path(
    get,
    path = "/api/enquiries",
    tag = "enquiries",
    responses((status = 200, description = "Enquiries", body = ListResponse<Enquiry>)),
    security(("bearer_auth" = []))
)]
pub async fn list_enquiries(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<EnquiryFilter>,
) -> Result<Json<ListResponse<Enquiry>>> {
    user.require_permission(&Permission::new("enquiries", "read"))?;
    let enquiries = queries::enquiries::list(&state.db, &filter).await?;
    Ok(Json(ListResponse::new(enquiries)))
}

/// Aggregate enquiry counts by status
#[utoipa::path(
    get,
    path = "/api/enquiries/stats",
    tag = "enquiries",
    responses((status = 200, description = "Enquiry statistics", body = EnquiryStats)),
    security(("bearer_auth" = []))
)]
pub async fn enquiry_stats(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<EnquiryStats>> {
    user.require_permission(&Permission::new("enquiries", "read"))?;
    let stats = queries::enquiries::stats(&state.db).await?;
    Ok(Json(stats))
}

/// Fetch one enquiry
#[utoipa::path(
    get,
    path = "/api/enquiries/{id}",
    tag = "enquiries",
    params(("id" = Uuid, Path, description = "Enquiry ID")),
    responses(
        (status = 200, description = "Enquiry", body = Enquiry),
        (status = 404, description = "Enquiry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_enquiry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Enquiry>> {
    user.require_permission(&Permission::new("enquiries", "read"))?;
    let enquiry = queries::enquiries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Enquiry"))?;
    Ok(Json(enquiry))
}

/// Raise an enquiry against a product
#[utoipa::path(
    post,
    path = "/api/enquiries",
    tag = "enquiries",
    request_body = CreateEnquiryRequest,
    responses(
        (status = 201, description = "Enquiry created", body = Enquiry),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_enquiry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateEnquiryRequest>,
) -> Result<impl IntoResponse> {
    user.require_permission(&Permission::new("enquiries", "create"))?;
    validate_request(&req)?;

    if queries::products::find_by_id(&state.db, req.product_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Product"));
    }

    let enquiry = queries::enquiries::insert(&state.db, user.0.sub, &req).await?;

    state.audit_logger.log_async(AuditEvent::EnquiryCreated {
        user_id: user.0.sub,
        enquiry_id: enquiry.id,
    });

    Ok(Created(enquiry))
}

/// Update an enquiry
#[utoipa::path(
    patch,
    path = "/api/enquiries/{id}",
    tag = "enquiries",
    params(("id" = Uuid, Path, description = "Enquiry ID")),
    request_body = UpdateEnquiryRequest,
    responses(
        (status = 200, description = "Updated enquiry", body = Enquiry),
        (status = 404, description = "Enquiry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_enquiry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEnquiryRequest>,
) -> Result<Json<Enquiry>> {
    user.require_permission(&Permission::new("enquiries", "update"))?;
    validate_request(&req)?;
    if let Some(status) = &req.status {
        parse_status(status)?;
    }

    let enquiry = queries::enquiries::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Enquiry"))?;
    Ok(Json(enquiry))
}

/// Respond to an enquiry: optionally move its status, optionally
/// append a message to the thread. Both changes land atomically.
#[utoipa::path(
    patch,
    path = "/api/enquiries/{id}/respond",
    tag = "enquiries",
    params(("id" = Uuid, Path, description = "Enquiry ID")),
    request_body = RespondToEnquiryRequest,
    responses(
        (status = 200, description = "Updated enquiry", body = Enquiry),
        (status = 403, description = "Seller access required"),
        (status = 404, description = "Enquiry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn respond_to_enquiry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RespondToEnquiryRequest>,
) -> Result<Json<Enquiry>> {
    user.require_permission(&Permission::new("enquiries", "respond"))?;
    if let Some(status) = &req.status {
        parse_status(status)?;
    }

    let mut tx = state.db.begin().await?;

    let enquiry = sqlx::query_as::<_, Enquiry>("SELECT * FROM enquiries WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Enquiry"))?;

    let enquiry = if let Some(status) = &req.status {
        sqlx::query_as::<_, Enquiry>(
            "UPDATE enquiries SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?
    } else {
        enquiry
    };

    if let Some(message) = &req.message {
        if message.trim().is_empty() {
            return Err(ApiError::validation_field("message", "Message cannot be empty"));
        }
        sqlx::query("INSERT INTO messages (enquiry_id, sender_id, content) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(user.0.sub)
            .bind(message)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    state.audit_logger.log_async(AuditEvent::EnquiryResponded {
        user_id: user.0.sub,
        enquiry_id: id,
        status: req.status.clone(),
    });

    Ok(Json(enquiry))
}

/// Delete an enquiry
#[utoipa::path(
    delete,
    path = "/api/enquiries/{id}",
    tag = "enquiries",
    params(("id" = Uuid, Path, description = "Enquiry ID")),
    responses(
        (status = 204, description = "Enquiry deleted"),
        (status = 404, description = "Enquiry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_enquiry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<NoContent> {
    user.require_permission(&Permission::new("enquiries", "delete"))?;
    let deleted = queries::enquiries::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::not_found("Enquiry"));
    }
    Ok(NoContent)
}
