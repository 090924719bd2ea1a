//! Application state shared across all handlers.

use crate::auth::jwt::JwtService;
use crate::config::Config;
use crate::services::AuditLogger;

/// Application state shared across handlers.
///
/// Holds the database pool, configuration, and the services needed to
/// process marketplace requests.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub db: sqlx::PgPool,
    /// Application configuration
    pub config: Config,
    /// JWT authentication service
    pub jwt_service: JwtService,
    /// Audit logging service
    pub audit_logger: AuditLogger,
}
