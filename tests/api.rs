//! Router-level tests that exercise authentication and authorization
//! without a live database. The pool is created lazily so requests
//! that stop at the auth layer never open a connection.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use tivra_api::auth::jwt::JwtService;
use tivra_api::services::AuditLogger;
use tivra_api::{AppState, Config, router};

const TEST_JWT_SECRET: &str = "router-test-signing-key-0123456789abcdef";

fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        port: 0,
        database_url: "postgres://localhost/unused".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration: 3600,
        jwt_refresh_expiration: 604800,
        max_connections: 1,
        request_timeout: 5,
        log_level: "info".to_string(),
        audit_log_enabled: false,
    }
}

fn test_app() -> (Router, JwtService) {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database_url)
        .expect("lazy pool");

    let jwt_service = JwtService::new(
        &config.jwt_secret,
        config.jwt_expiration,
        config.jwt_refresh_expiration,
    );
    let audit_logger = AuditLogger::new(pool.clone(), false);

    let state = AppState {
        db: pool,
        config,
        jwt_service: jwt_service.clone(),
        audit_logger,
    };

    (router::build_router(state), jwt_service)
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn protected_route_rejects_missing_token() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/enquiries")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_rejects_garbage_token() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/orders")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_rejected_on_protected_routes() {
    let (app, jwt) = test_app();
    let pair = jwt
        .generate_token_pair(Uuid::new_v4(), "alice", "Buyer")
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/enquiries")
                .header(header::AUTHORIZATION, bearer(&pair.refresh))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_endpoint_issues_new_access_token() {
    let (app, jwt) = test_app();
    let pair = jwt
        .generate_token_pair(Uuid::new_v4(), "alice", "Buyer")
        .unwrap();

    let body = serde_json::json!({ "refresh": pair.refresh }).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let access = json["access"].as_str().unwrap();

    let claims = jwt.decode_token(access).unwrap();
    assert_eq!(claims.token_type, "access");
    assert_eq!(claims.role, "Buyer");
}

#[tokio::test]
async fn refresh_endpoint_rejects_access_token() {
    let (app, jwt) = test_app();
    let pair = jwt
        .generate_token_pair(Uuid::new_v4(), "alice", "Seller")
        .unwrap();

    let body = serde_json::json!({ "refresh": pair.access }).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_forbid_other_roles() {
    let (app, jwt) = test_app();
    let pair = jwt
        .generate_token_pair(Uuid::new_v4(), "bob", "Seller")
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::AUTHORIZATION, bearer(&pair.access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn available_jobs_requires_transporter_role() {
    let (app, jwt) = test_app();
    let pair = jwt
        .generate_token_pair(Uuid::new_v4(), "bob", "Buyer")
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/orders/available-jobs")
                .header(header::AUTHORIZATION, bearer(&pair.access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn buyers_cannot_publish_products() {
    let (app, jwt) = test_app();
    let pair = jwt
        .generate_token_pair(Uuid::new_v4(), "bob", "Buyer")
        .unwrap();

    let body = serde_json::json!({
        "commodity_type": "Biomass",
        "quantity": 100.0,
        "price": "2500.00",
        "unit_of_measure": "kg",
        "availability_dates": "2026-09-01 to 2026-09-30",
        "pickup_location": "Pune"
    })
    .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, bearer(&pair.access))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn transporters_cannot_read_enquiries() {
    let (app, jwt) = test_app();
    let pair = jwt
        .generate_token_pair(Uuid::new_v4(), "carrier", "Transporter")
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/enquiries")
                .header(header::AUTHORIZATION, bearer(&pair.access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn register_missing_field_returns_400_naming_it() {
    let (app, _) = test_app();

    // gst_number is deliberately absent; the request never reaches the
    // database because body extraction rejects it first.
    let body = serde_json::json!({
        "email": "new@example.com",
        "username": "newcomer",
        "password": "password123",
        "role": "Buyer",
        "kyc_document": "kyc-001",
        "location": "Nagpur",
        "contact_info": "9999999999"
    })
    .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"]["code"], "VAL_3002");
    assert_eq!(json["error"]["field"], "gst_number");
}

#[tokio::test]
async fn message_update_requires_token() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/messages/{}", Uuid::new_v4()))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"content":"edited"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_creation_is_admin_only() {
    let (app, jwt) = test_app();
    let pair = jwt
        .generate_token_pair(Uuid::new_v4(), "bob", "Seller")
        .unwrap();

    let body = serde_json::json!({
        "email": "staff@example.com",
        "username": "staff",
        "password": "password123",
        "role": "Seller"
    })
    .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/users")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, bearer(&pair.access))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/routes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert!(headers.contains_key("X-Request-ID"));
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
}

#[tokio::test]
async fn unknown_route_returns_not_found() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nothing-here")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
