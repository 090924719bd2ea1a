use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Message, MessageFilter, UpdateMessageRequest};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Message>> {
    let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(message)
}

pub async fn list(pool: &PgPool, filter: &MessageFilter) -> Result<Vec<Message>> {
    let mut qb = QueryBuilder::new("SELECT * FROM messages WHERE 1=1");

    if let Some(enquiry_id) = filter.enquiry_id {
        qb.push(" AND enquiry_id = ").push_bind(enquiry_id);
    }
    if let Some(sender_id) = filter.sender_id {
        qb.push(" AND sender_id = ").push_bind(sender_id);
    }
    qb.push(" ORDER BY created_at ASC");

    let messages = qb.build_query_as::<Message>().fetch_all(pool).await?;
    Ok(messages)
}

pub async fn insert(
    pool: &PgPool,
    enquiry_id: Uuid,
    sender_id: Uuid,
    content: &str,
) -> Result<Message> {
    let message = sqlx::query_as::<_, Message>(
        "INSERT INTO messages (enquiry_id, sender_id, content)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(enquiry_id)
    .bind(sender_id)
    .bind(content)
    .fetch_one(pool)
    .await?;
    Ok(message)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateMessageRequest,
) -> Result<Option<Message>> {
    let message = sqlx::query_as::<_, Message>(
        "UPDATE messages SET content = COALESCE($2, content)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&req.content)
    .fetch_optional(pool)
    .await?;
    Ok(message)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM messages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
