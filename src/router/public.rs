//! Public routes that don't require authentication.
//!
//! Includes: health check, authentication endpoints, product browsing, Swagger UI.

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::app_state::AppState;
use crate::handlers::{
    audit_logs, auth, enquiries, health, messages, orders, products, profiles, routes,
    transactions, users,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(title = "Tivra Marketplace API", version = "1.0.0"),
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::refresh,
        products::list_products,
        products::product_stats,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        profiles::list_profiles,
        profiles::get_profile,
        profiles::create_profile,
        profiles::update_profile,
        profiles::delete_profile,
        enquiries::list_enquiries,
        enquiries::enquiry_stats,
        enquiries::get_enquiry,
        enquiries::create_enquiry,
        enquiries::update_enquiry,
        enquiries::respond_to_enquiry,
        enquiries::delete_enquiry,
        messages::list_messages,
        messages::get_message,
        messages::create_message,
        messages::update_message,
        messages::delete_message,
        orders::list_orders,
        orders::available_jobs,
        orders::order_stats,
        orders::get_order,
        orders::create_order,
        orders::update_order,
        orders::delete_order,
        transactions::list_transactions,
        transactions::transaction_stats,
        transactions::get_transaction_by_order,
        transactions::get_transaction,
        transactions::create_transaction,
        transactions::update_transaction,
        transactions::delete_transaction,
        routes::list_routes,
        routes::route_stats,
        routes::route_network,
        routes::common_routes,
        routes::get_route,
        routes::create_route,
        routes::update_route,
        routes::delete_route,
        users::list_users,
        users::user_stats,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        audit_logs::list_audit_logs,
        audit_logs::get_audit_log,
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

/// Registers the bearer token scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Build public routes that don't require authentication.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        // Authentication routes
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        // Public product browsing
        .route("/api/products", get(products::list_products))
        .route("/api/products/stats", get(products::product_stats))
        .route("/api/products/{id}", get(products::get_product))
        // Swagger UI
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}
