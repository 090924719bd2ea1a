//! Router configuration module.

use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::middleware::{add_security_headers, request_logger_middleware};

pub mod admin;
pub mod protected;
pub mod public;

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let request_timeout = app_state.config.request_timeout;

    public::public_routes()
        .merge(protected::protected_routes(app_state.clone()))
        .merge(admin::admin_routes(app_state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_logger_middleware))
                .layer(axum::middleware::from_fn(add_security_headers))
                .layer(TimeoutLayer::new(Duration::from_secs(request_timeout)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
