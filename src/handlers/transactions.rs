//! Payment record endpoints.

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
use crate::models::{
    CreateTransactionRequest, Transaction, TransactionFilter, TransactionStats,
    UpdateTransactionRequest,
};
use crate::services::AuditEvent;

/// List transactions
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "transactions",
    responses((status = 200, description = "Transactions", body = ListResponse<Transaction>)),
    security(("bearer_auth" = []))
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<TransactionFilter>,
) -> Result<Json<ListResponse<Transaction>>> {
    user.require_permission(&Permission::new("transactions", "read"))?;
    let transactions = queries::transactions::list(&state.db, &filter).await?;
    Ok(Json(ListResponse::new(transactions)))
}

/// Aggregate transaction totals
#[utoipa::path(
    get,
    path = "/api/transactions/stats",
    tag = "transactions",
    responses((status = 200, description = "Transaction statistics", body = TransactionStats)),
    security(("bearer_auth" = []))
)]
pub async fn transaction_stats(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<TransactionStats>> {
    user.require_permission(&Permission::new("transactions", "read"))?;
    let stats = queries::transactions::stats(&state.db).await?;
    Ok(Json(stats))
}

/// Fetch the transaction for an order
#[utoipa::path(
    get,
    path = "/api/transactions/by-order/{order_id}",
    tag = "transactions",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 404, description = "Transaction not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_transaction_by_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Transaction>> {
    user.require_permission(&Permission::new("transactions", "read"))?;
    let transaction = queries::transactions::find_by_order(&state.db, order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction"))?;
    Ok(Json(transaction))
}

/// Fetch one transaction
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "transactions",
    params(("id" = Uuid, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 404, description = "Transaction not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Transaction>> {
    user.require_permission(&Permission::new("transactions", "read"))?;
    let transaction = queries::transactions::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction"))?;
    Ok(Json(transaction))
}

/// Record a payment for an order
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = Transaction),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already has a transaction")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse> {
    user.require_permission(&Permission::new("transactions", "create"))?;

    if queries::orders::find_by_id(&state.db, req.order_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Order"));
    }
    if queries::transactions::find_by_order(&state.db, req.order_id)
        .await?
        .is_some()
    {
        return Err(ApiError::already_exists("Transaction for this order"));
    }

    let transaction = queries::transactions::insert(&state.db, &req).await?;

    state
        .audit_logger
        .log_async(AuditEvent::TransactionCreated {
            user_id: user.0.sub,
            transaction_id: transaction.id,
            order_id: req.order_id,
        });

    Ok(Created(transaction))
}

/// Update a transaction
#[utoipa::path(
    patch,
    path = "/api/transactions/{id}",
    tag = "transactions",
    params(("id" = Uuid, Path, description = "Transaction ID")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Updated transaction", body = Transaction),
        (status = 404, description = "Transaction not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTransactionRequest>,
) -> Result<Json<Transaction>> {
    user.require_permission(&Permission::new("transactions", "update"))?;
    let transaction = queries::transactions::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction"))?;
    Ok(Json(transaction))
}

/// Delete a transaction
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "transactions",
    params(("id" = Uuid, Path, description = "Transaction ID")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<NoContent> {
    user.require_permission(&Permission::new("transactions", "delete"))?;
    let deleted = queries::transactions::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::not_found("Transaction"));
    }
    Ok(NoContent)
}
