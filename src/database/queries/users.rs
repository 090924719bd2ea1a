use sqlx::{PgPool, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::Role;
use crate::error::Result;
use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserFilter, UserStats};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn list(pool: &PgPool, filter: &UserFilter) -> Result<Vec<User>> {
    let mut qb = QueryBuilder::new("SELECT * FROM users WHERE 1=1");

    if let Some(role) = &filter.role {
        qb.push(" AND role = ").push_bind(role);
    }
    if let Some(is_verified) = filter.is_verified {
        qb.push(" AND is_verified = ").push_bind(is_verified);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (username ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    qb.push(" ORDER BY created_at DESC");

    let users = qb.build_query_as::<User>().fetch_all(pool).await?;
    Ok(users)
}

pub async fn insert(
    pool: &PgPool,
    req: &CreateUserRequest,
    role: Role,
    password_hash: &str,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, role, is_verified)
         VALUES ($1, $2, $3, $4, COALESCE($5, FALSE))
         RETURNING *",
    )
    .bind(&req.username)
    .bind(&req.email)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(req.is_verified)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

pub async fn update(pool: &PgPool, id: Uuid, req: &UpdateUserRequest) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET
            username = COALESCE($2, username),
            email = COALESCE($3, email),
            role = COALESCE($4, role),
            is_verified = COALESCE($5, is_verified),
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&req.username)
    .bind(&req.email)
    .bind(&req.role)
    .bind(req.is_verified)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn stats(pool: &PgPool) -> Result<UserStats> {
    let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    let verified_users =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE is_verified = TRUE")
            .fetch_one(pool)
            .await?;

    // Every role appears in the map, even with zero users
    let mut role_stats: HashMap<String, i64> = Role::ALL
        .iter()
        .map(|r| (r.as_str().to_string(), 0))
        .collect();
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT role, COUNT(*) FROM users GROUP BY role",
    )
    .fetch_all(pool)
    .await?;
    for (role, count) in rows {
        role_stats.insert(role, count);
    }

    Ok(UserStats {
        total_users,
        verified_users,
        unverified_users: total_users - verified_users,
        role_stats,
    })
}
