//! Admin-only audit log access.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::AppState;
use crate::database::queries;
use crate::error::{ApiError, Result};
use crate::handlers::response::ListResponse;
use crate::models::{AuditLog, AuditLogFilter};

/// List audit log entries
#[utoipa::path(
    get,
    path = "/api/audit-logs",
    tag = "audit",
    responses(
        (status = 200, description = "Audit log entries", body = ListResponse<AuditLog>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(filter): Query<AuditLogFilter>,
) -> Result<Json<ListResponse<AuditLog>>> {
    let logs = queries::audit::list(&state.db, &filter).await?;
    Ok(Json(ListResponse::new(logs)))
}

/// Fetch one audit log entry
#[utoipa::path(
    get,
    path = "/api/audit-logs/{id}",
    tag = "audit",
    params(("id" = Uuid, Path, description = "Audit log ID")),
    responses(
        (status = 200, description = "Audit log entry", body = AuditLog),
        (status = 404, description = "Audit log not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_audit_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AuditLog>> {
    let log = queries::audit::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Audit log"))?;
    Ok(Json(log))
}
