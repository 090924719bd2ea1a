//! Admin-only routes: user management and audit log access.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};

use crate::app_state::AppState;
use crate::auth;
use crate::handlers::{audit_logs, users};

/// Build admin routes. Requires a valid token and the Admin role.
pub fn admin_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/stats", get(users::user_stats))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/audit-logs", get(audit_logs::list_audit_logs))
        .route("/api/audit-logs/{id}", get(audit_logs::get_audit_log))
        .route_layer(from_fn(auth::middleware::require_admin_role))
        .route_layer(from_fn_with_state(
            app_state,
            auth::middleware::auth_middleware,
        ))
}
