//! Transport route endpoints, including the network overview and the
//! common-routes comparison between two transporters.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::auth::{Permission, Role};
use crate::auth::middleware::AuthenticatedUser;
use crate::database::queries;
use crate::database::queries::routes::find_common_routes;
use crate::error::{ApiError, ErrorCode, Result};
use crate::extractors::Json;
use crate::handlers::response::{Created, ListResponse, NoContent};
use crate::models::{
    CommonRoutesQuery, CreateRouteRequest, Route, RouteFilter, RouteNetwork, RouteStats,
    UpdateRouteRequest,
};
use crate::services::AuditEvent;
use crate::utils::validate_request;

/// List routes
#[utoipa::path(
    get,
    path = "/api/routes",
    tag = "routes",
    responses((status = 200, description = "Routes", body = ListResponse<Route>)),
    security(("bearer_auth" = []))
)]
pub async fn list_routes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<RouteFilter>,
) -> Result<Json<ListResponse<Route>>> {
    user.require_permission(&Permission::new("routes", "read"))?;
    let routes = queries::routes::list(&state.db, &filter).await?;
    Ok(Json(ListResponse::new(routes)))
}

/// Route and transporter counts
#[utoipa::path(
    get,
    path = "/api/routes/stats",
    tag = "routes",
    responses((status = 200, description = "Route statistics", body = RouteStats)),
    security(("bearer_auth" = []))
)]
pub async fn route_stats(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<RouteStats>> {
    user.require_permission(&Permission::new("routes", "read"))?;
    let stats = queries::routes::stats(&state.db).await?;
    Ok(Json(stats))
}

/// Aggregate view of all served locations
#[utoipa::path(
    get,
    path = "/api/routes/network",
    tag = "routes",
    responses((status = 200, description = "Route network", body = RouteNetwork)),
    security(("bearer_auth" = []))
)]
pub async fn route_network(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<RouteNetwork>> {
    user.require_permission(&Permission::new("routes", "read"))?;
    let network = queries::routes::network(&state.db).await?;
    Ok(Json(network))
}

/// Routes served by both of two transporters
#[utoipa::path(
    get,
    path = "/api/routes/common",
    tag = "routes",
    params(
        ("first" = Uuid, Query, description = "First transporter ID"),
        ("second" = Uuid, Query, description = "Second transporter ID")
    ),
    responses((status = 200, description = "Common routes", body = ListResponse<Route>)),
    security(("bearer_auth" = []))
)]
pub async fn common_routes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<CommonRoutesQuery>,
) -> Result<Json<ListResponse<Route>>> {
    user.require_permission(&Permission::new("routes", "read"))?;

    let first = queries::routes::list_by_transporter(&state.db, query.first).await?;
    let second = queries::routes::list_by_transporter(&state.db, query.second).await?;

    Ok(Json(ListResponse::new(find_common_routes(&first, &second))))
}

/// Fetch one route
#[utoipa::path(
    get,
    path = "/api/routes/{id}",
    tag = "routes",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route", body = Route),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_route(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Route>> {
    user.require_permission(&Permission::new("routes", "read"))?;
    let route = queries::routes::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Route"))?;
    Ok(Json(route))
}

/// Publish a new route
#[utoipa::path(
    post,
    path = "/api/routes",
    tag = "routes",
    request_body = CreateRouteRequest,
    responses(
        (status = 201, description = "Route created", body = Route),
        (status = 403, description = "Transporter access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_route(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateRouteRequest>,
) -> Result<impl IntoResponse> {
    user.require_permission(&Permission::new("routes", "create"))?;
    validate_request(&req)?;

    let route = queries::routes::insert(&state.db, user.0.sub, &req).await?;

    state.audit_logger.log_async(AuditEvent::RouteCreated {
        user_id: user.0.sub,
        route_id: route.id,
    });

    Ok(Created(route))
}

/// Update a route
#[utoipa::path(
    patch,
    path = "/api/routes/{id}",
    tag = "routes",
    params(("id" = Uuid, Path, description = "Route ID")),
    request_body = UpdateRouteRequest,
    responses(
        (status = 200, description = "Updated route", body = Route),
        (status = 403, description = "Not the owning transporter"),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_route(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRouteRequest>,
) -> Result<Json<Route>> {
    let role = user.require_permission(&Permission::new("routes", "update"))?;
    validate_request(&req)?;

    let existing = queries::routes::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Route"))?;
    if role != Role::Admin && existing.transporter_id != user.0.sub {
        return Err(ApiError::with_code(
            ErrorCode::InsufficientPermissions,
            "You can only modify your own routes",
        ));
    }

    let route = queries::routes::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Route"))?;
    Ok(Json(route))
}

/// Delete a route
#[utoipa::path(
    delete,
    path = "/api/routes/{id}",
    tag = "routes",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 204, description = "Route deleted"),
        (status = 403, description = "Not the owning transporter"),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_route(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<NoContent> {
    let role = user.require_permission(&Permission::new("routes", "delete"))?;

    let existing = queries::routes::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Route"))?;
    if role != Role::Admin && existing.transporter_id != user.0.sub {
        return Err(ApiError::with_code(
            ErrorCode::InsufficientPermissions,
            "You can only delete your own routes",
        ));
    }

    queries::routes::delete(&state.db, id).await?;
    Ok(NoContent)
}
