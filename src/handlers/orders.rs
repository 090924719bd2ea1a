//! Delivery order endpoints, including the transporter job board.

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
    CreateOrderRequest, Order, OrderFilter, OrderStats, OrderStatus, UpdateOrderRequest,
};
use crate::services::AuditEvent;

fn parse_status(value: &str) -> Result<OrderStatus> {
    value.parse().map_err(|_| {
        ApiError::with_code(
            ErrorCode::InvalidStatus,
            format!("Unknown order status: {}", value),
        )
    })
}

/// List orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    responses((status = 200, description = "Orders", body = ListResponse<Order>)),
    security(("bearer_auth" = []))
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<ListResponse<Order>>> {
    let orders = queries::orders::list(&state.db, &filter).await?;
    Ok(Json(ListResponse::new(orders)))
}

/// Unclaimed orders open for transporters
#[utoipa::path(
    get,
    path = "/api/orders/available-jobs",
    tag = "orders",
    responses(
        (status = 200, description = "Orders awaiting a transporter", body = ListResponse<Order>),
        (status = 403, description = "Transporter access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn available_jobs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ListResponse<Order>>> {
    user.require_permission(&Permission::new("orders", "jobs"))?;
    let orders = queries::orders::available_jobs(&state.db).await?;
    Ok(Json(ListResponse::new(orders)))
}

/// Aggregate order counts by status
#[utoipa::path(
    get,
    path = "/api/orders/stats",
    tag = "orders",
    responses((status = 200, description = "Order statistics", body = OrderStats)),
    security(("bearer_auth" = []))
)]
pub async fn order_stats(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<OrderStats>> {
    let stats = queries::orders::stats(&state.db).await?;
    Ok(Json(stats))
}

/// Fetch one order
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>> {
    let order = queries::orders::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order"))?;
    Ok(Json(order))
}

/// Create an order from an enquiry
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 404, description = "Enquiry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse> {
    if queries::enquiries::find_by_id(&state.db, req.enquiry_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Enquiry"));
    }

    let order = queries::orders::insert(&state.db, &req).await?;

    state.audit_logger.log_async(AuditEvent::OrderCreated {
        user_id: user.0.sub,
        order_id: order.id,
    });

    Ok(Created(order))
}

/// Update an order's transporter or status
#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<Order>> {
    if let Some(status) = &req.status {
        parse_status(status)?;
    }

    let order = queries::orders::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Order"))?;

    state.audit_logger.log_async(AuditEvent::OrderUpdated {
        user_id: user.0.sub,
        order_id: id,
        status: req.status.clone(),
    });

    Ok(Json(order))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<NoContent> {
    let deleted = queries::orders::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::not_found("Order"));
    }
    Ok(NoContent)
}
