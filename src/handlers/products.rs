//! Commodity listing endpoints. Browsing is public; mutations are
//! restricted to the owning seller or an admin.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::auth::{Permission, Role};
use crate::auth::middleware::AuthenticatedUser;
use crate::database::queries;
use crate::error::{ApiError, ErrorCode, Result};
use crate::extractors::Json;
use crate::handlers::response::{Created, ListResponse, NoContent};
use crate::models::{
    CommodityType, CreateProductRequest, Product, ProductFilter, ProductStats,
    UpdateProductRequest,
};
use crate::services::AuditEvent;
use crate::utils::validate_request;

fn parse_commodity(value: &str) -> Result<CommodityType> {
    value.parse().map_err(|_| {
        ApiError::with_code(
            ErrorCode::InvalidInput,
            format!("Unknown commodity type: {}", value),
        )
    })
}

/// Browse commodity listings
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses((status = 200, description = "Product listings", body = ListResponse<Product>))
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<ListResponse<Product>>> {
    let products = queries::products::list(&state.db, &filter).await?;
    Ok(Json(ListResponse::new(products)))
}

/// Aggregate listing counts and price averages
#[utoipa::path(
    get,
    path = "/api/products/stats",
    tag = "products",
    responses((status = 200, description = "Product statistics", body = ProductStats))
)]
pub async fn product_stats(State(state): State<AppState>) -> Result<Json<ProductStats>> {
    let stats = queries::products::stats(&state.db).await?;
    Ok(Json(stats))
}

/// Fetch one listing
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product listing", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>> {
    let product = queries::products::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product"))?;
    Ok(Json(product))
}

/// Publish a new listing
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 403, description = "Seller access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateProductRequest>,
) -> Result<impl IntoResponse> {
    user.require_permission(&Permission::new("products", "create"))?;
    validate_request(&req)?;
    parse_commodity(&req.commodity_type)?;

    let product = queries::products::insert(&state.db, user.0.sub, &req).await?;

    state.audit_logger.log_async(AuditEvent::ProductCreated {
        user_id: user.0.sub,
        product_id: product.id,
    });

    Ok(Created(product))
}

/// Update a listing
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 403, description = "Not the owning seller"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let role = user.require_permission(&Permission::new("products", "update"))?;
    validate_request(&req)?;
    if let Some(commodity_type) = &req.commodity_type {
        parse_commodity(commodity_type)?;
    }

    let existing = queries::products::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product"))?;
    if role != Role::Admin && existing.seller_id != user.0.sub {
        return Err(ApiError::with_code(
            ErrorCode::InsufficientPermissions,
            "You can only modify your own products",
        ));
    }

    let product = queries::products::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Product"))?;

    state.audit_logger.log_async(AuditEvent::ProductUpdated {
        user_id: user.0.sub,
        product_id: id,
    });

    Ok(Json(product))
}

/// Remove a listing
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Not the owning seller"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<NoContent> {
    let role = user.require_permission(&Permission::new("products", "delete"))?;

    let existing = queries::products::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product"))?;
    if role != Role::Admin && existing.seller_id != user.0.sub {
        return Err(ApiError::with_code(
            ErrorCode::InsufficientPermissions,
            "You can only delete your own products",
        ));
    }

    queries::products::delete(&state.db, id).await?;

    state.audit_logger.log_async(AuditEvent::ProductDeleted {
        user_id: user.0.sub,
        product_id: id,
    });

    Ok(NoContent)
}
