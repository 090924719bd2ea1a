use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CreateOrderRequest, Order, OrderFilter, OrderStats, OrderStatus, UpdateOrderRequest,
};

/// An order counts as an open job while it is still in the Requested
/// state and no transporter has claimed it. The `available_jobs` query
/// filters on the same condition in SQL.
pub fn is_available_job(order: &Order) -> bool {
    order.status == OrderStatus::Requested.as_str() && order.transporter_id.is_none()
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn list(pool: &PgPool, filter: &OrderFilter) -> Result<Vec<Order>> {
    let mut qb = QueryBuilder::new("SELECT * FROM orders WHERE 1=1");

    if let Some(enquiry_id) = filter.enquiry_id {
        qb.push(" AND enquiry_id = ").push_bind(enquiry_id);
    }
    if let Some(transporter_id) = filter.transporter_id {
        qb.push(" AND transporter_id = ").push_bind(transporter_id);
    }
    if let Some(status) = &filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    qb.push(" ORDER BY created_at DESC");

    let orders = qb.build_query_as::<Order>().fetch_all(pool).await?;
    Ok(orders)
}

/// Orders still waiting for a transporter to claim them, oldest first.
/// Matches [`is_available_job`].
pub async fn available_jobs(pool: &PgPool) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders
         WHERE status = 'Requested' AND transporter_id IS NULL
         ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn insert(pool: &PgPool, req: &CreateOrderRequest) -> Result<Order> {
    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (enquiry_id, transporter_id)
         VALUES ($1, $2)
         RETURNING *",
    )
    .bind(req.enquiry_id)
    .bind(req.transporter_id)
    .fetch_one(pool)
    .await?;
    Ok(order)
}

pub async fn update(pool: &PgPool, id: Uuid, req: &UpdateOrderRequest) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET
            transporter_id = COALESCE($2, transporter_id),
            status = COALESCE($3, status),
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(req.transporter_id)
    .bind(&req.status)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn stats(pool: &PgPool) -> Result<OrderStats> {
    let row = sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64)>(
        "SELECT
            COUNT(*),
            COUNT(*) FILTER (WHERE status = 'Requested'),
            COUNT(*) FILTER (WHERE status = 'Picked'),
            COUNT(*) FILTER (WHERE status = 'In Transit'),
            COUNT(*) FILTER (WHERE status = 'Delivered'),
            COUNT(*) FILTER (WHERE status = 'Requested' AND transporter_id IS NULL)
         FROM orders",
    )
    .fetch_one(pool)
    .await?;

    Ok(OrderStats {
        total_orders: row.0,
        requested_orders: row.1,
        picked_orders: row.2,
        in_transit_orders: row.3,
        delivered_orders: row.4,
        available_jobs: row.5,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(status: OrderStatus, transporter_id: Option<Uuid>) -> Order {
        Order {
            id: Uuid::new_v4(),
            enquiry_id: Uuid::new_v4(),
            transporter_id,
            status: status.as_str().to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_requested_unclaimed_order_is_available() {
        assert!(is_available_job(&order(OrderStatus::Requested, None)));
    }

    #[test]
    fn test_claimed_order_is_not_available() {
        let claimed = order(OrderStatus::Requested, Some(Uuid::new_v4()));
        assert!(!is_available_job(&claimed));
    }

    #[test]
    fn test_started_order_is_not_available() {
        assert!(!is_available_job(&order(OrderStatus::Picked, None)));
        assert!(!is_available_job(&order(OrderStatus::InTransit, None)));
        assert!(!is_available_job(&order(OrderStatus::Delivered, None)));
    }
}
