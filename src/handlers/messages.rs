//! Negotiation message endpoints.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::auth::Permission;
use crate::auth::middleware::AuthenticatedUser;
use crate::database::queries;
use crate::error::{ApiError, Result};
use crate::extractors::Json;
use crate::handlers::response::{Created, ListResponse, NoContent};
use crate::models::{CreateMessageRequest, Message, MessageFilter, UpdateMessageRequest};
use crate::utils::validate_request;

/// List messages, usually scoped to one enquiry thread
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "messages",
    responses((status = 200, description = "Messages", body = ListResponse<Message>)),
    security(("bearer_auth" = []))
)]
pub async fn list_messages(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<MessageFilter>,
) -> Result<Json<ListResponse<Message>>> {
    user.require_permission(&Permission::new("messages", "read"))?;
    let messages = queries::messages::list(&state.db, &filter).await?;
    Ok(Json(ListResponse::new(messages)))
}

/// Fetch one message
#[utoipa::path(
    get,
    path = "/api/messages/{id}",
    tag = "messages",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message", body = Message),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>> {
    user.require_permission(&Permission::new("messages", "read"))?;
    let message = queries::messages::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message"))?;
    Ok(Json(message))
}

/// Post a message to an enquiry thread
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message created", body = Message),
        (status = 404, description = "Enquiry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse> {
    user.require_permission(&Permission::new("messages", "create"))?;
    validate_request(&req)?;

    if queries::enquiries::find_by_id(&state.db, req.enquiry_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Enquiry"));
    }

    let message =
        queries::messages::insert(&state.db, req.enquiry_id, user.0.sub, &req.content).await?;
    Ok(Created(message))
}

/// Edit a message's content
#[utoipa::path(
    patch,
    path = "/api/messages/{id}",
    tag = "messages",
    params(("id" = Uuid, Path, description = "Message ID")),
    request_body = UpdateMessageRequest,
    responses(
        (status = 200, description = "Updated message", body = Message),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<Json<Message>> {
    user.require_permission(&Permission::new("messages", "update"))?;
    validate_request(&req)?;
    let message = queries::messages::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Message"))?;
    Ok(Json(message))
}

/// Delete a message
#[utoipa::path(
    delete,
    path = "/api/messages/{id}",
    tag = "messages",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<NoContent> {
    user.require_permission(&Permission::new("messages", "delete"))?;
    let deleted = queries::messages::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::not_found("Message"));
    }
    Ok(NoContent)
}
