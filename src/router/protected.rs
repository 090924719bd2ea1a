//! Protected routes that require authentication.
//!
//! Includes: profiles, product mutations, enquiries, messages, orders,
//! transactions, and transport routes.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};

use crate::app_state::AppState;
use crate::auth;
use crate::handlers::{enquiries, messages, orders, products, profiles, routes, transactions};

/// Build protected routes that require authentication.
pub fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        // Profile routes
        .route(
            "/api/profiles",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route(
            "/api/profiles/{id}",
            get(profiles::get_profile)
                .patch(profiles::update_profile)
                .delete(profiles::delete_profile),
        )
        // Product mutations (browsing is public)
        .route("/api/products", post(products::create_product))
        .route(
            "/api/products/{id}",
            patch(products::update_product).delete(products::delete_product),
        )
        // Enquiry routes
        .route(
            "/api/enquiries",
            get(enquiries::list_enquiries).post(enquiries::create_enquiry),
        )
        .route("/api/enquiries/stats", get(enquiries::enquiry_stats))
        .route(
            "/api/enquiries/{id}",
            get(enquiries::get_enquiry)
                .patch(enquiries::update_enquiry)
                .delete(enquiries::delete_enquiry),
        )
        .route(
            "/api/enquiries/{id}/respond",
            patch(enquiries::respond_to_enquiry),
        )
        // Message routes
        .route(
            "/api/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/api/messages/{id}",
            get(messages::get_message)
                .patch(messages::update_message)
                .delete(messages::delete_message),
        )
        // Order routes
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/api/orders/available-jobs", get(orders::available_jobs))
        .route("/api/orders/stats", get(orders::order_stats))
        .route(
            "/api/orders/{id}",
            get(orders::get_order)
                .patch(orders::update_order)
                .delete(orders::delete_order),
        )
        // Transaction routes
        .route(
            "/api/transactions",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route(
            "/api/transactions/stats",
            get(transactions::transaction_stats),
        )
        .route(
            "/api/transactions/by-order/{order_id}",
            get(transactions::get_transaction_by_order),
        )
        .route(
            "/api/transactions/{id}",
            get(transactions::get_transaction)
                .patch(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
        // Transport route endpoints
        .route(
            "/api/routes",
            get(routes::list_routes).post(routes::create_route),
        )
        .route("/api/routes/stats", get(routes::route_stats))
        .route("/api/routes/network", get(routes::route_network))
        .route("/api/routes/common", get(routes::common_routes))
        .route(
            "/api/routes/{id}",
            get(routes::get_route)
                .patch(routes::update_route)
                .delete(routes::delete_route),
        )
        // Apply authentication middleware
        .route_layer(from_fn_with_state(
            app_state,
            auth::middleware::auth_middleware,
        ))
}
