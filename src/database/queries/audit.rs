use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{AuditLog, AuditLogFilter};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<AuditLog>> {
    let log = sqlx::query_as::<_, AuditLog>("SELECT * FROM audit_logs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(log)
}

pub async fn list(pool: &PgPool, filter: &AuditLogFilter) -> Result<Vec<AuditLog>> {
    let mut qb = QueryBuilder::new("SELECT * FROM audit_logs WHERE 1=1");

    if let Some(user_id) = filter.user_id {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(action) = &filter.action {
        qb.push(" AND action ILIKE ")
            .push_bind(format!("%{}%", action));
    }
    qb.push(" ORDER BY created_at DESC");

    let logs = qb.build_query_as::<AuditLog>().fetch_all(pool).await?;
    Ok(logs)
}

pub async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    action: &str,
    details: &serde_json::Value,
) -> Result<AuditLog> {
    let log = sqlx::query_as::<_, AuditLog>(
        "INSERT INTO audit_logs (user_id, action, details)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(user_id)
    .bind(action)
    .bind(details)
    .fetch_one(pool)
    .await?;
    Ok(log)
}
