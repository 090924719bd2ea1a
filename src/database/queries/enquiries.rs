use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CreateEnquiryRequest, Enquiry, EnquiryFilter, EnquiryStats, UpdateEnquiryRequest,
};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Enquiry>> {
    let enquiry = sqlx::query_as::<_, Enquiry>("SELECT * FROM enquiries WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(enquiry)
}

pub async fn list(pool: &PgPool, filter: &EnquiryFilter) -> Result<Vec<Enquiry>> {
    let mut qb = QueryBuilder::new("SELECT * FROM enquiries WHERE 1=1");

    if let Some(buyer_id) = filter.buyer_id {
        qb.push(" AND buyer_id = ").push_bind(buyer_id);
    }
    if let Some(product_id) = filter.product_id {
        qb.push(" AND product_id = ").push_bind(product_id);
    }
    if let Some(status) = &filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    qb.push(" ORDER BY created_at DESC");

    let enquiries = qb.build_query_as::<Enquiry>().fetch_all(pool).await?;
    Ok(enquiries)
}

pub async fn insert(
    pool: &PgPool,
    buyer_id: Uuid,
    req: &CreateEnquiryRequest,
) -> Result<Enquiry> {
    let enquiry = sqlx::query_as::<_, Enquiry>(
        "INSERT INTO enquiries (buyer_id, product_id, quantity, offered_price)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(buyer_id)
    .bind(req.product_id)
    .bind(req.quantity)
    .bind(req.offered_price)
    .fetch_one(pool)
    .await?;
    Ok(enquiry)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateEnquiryRequest,
) -> Result<Option<Enquiry>> {
    let enquiry = sqlx::query_as::<_, Enquiry>(
        "UPDATE enquiries SET
            quantity = COALESCE($2, quantity),
            offered_price = COALESCE($3, offered_price),
            status = COALESCE($4, status)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(req.quantity)
    .bind(req.offered_price)
    .bind(&req.status)
    .fetch_optional(pool)
    .await?;
    Ok(enquiry)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM enquiries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn stats(pool: &PgPool) -> Result<EnquiryStats> {
    let row = sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
        "SELECT
            COUNT(*),
            COUNT(*) FILTER (WHERE status = 'Pending'),
            COUNT(*) FILTER (WHERE status = 'Accepted'),
            COUNT(*) FILTER (WHERE status = 'Rejected'),
            COUNT(*) FILTER (WHERE status = 'Negotiating')
         FROM enquiries",
    )
    .fetch_one(pool)
    .await?;

    let average_offered_price =
        sqlx::query_scalar::<_, Option<Decimal>>("SELECT AVG(offered_price) FROM enquiries")
            .fetch_one(pool)
            .await?;
    let average_quantity =
        sqlx::query_scalar::<_, Option<f64>>("SELECT AVG(quantity) FROM enquiries")
            .fetch_one(pool)
            .await?;

    Ok(EnquiryStats {
        total_enquiries: row.0,
        pending_enquiries: row.1,
        accepted_enquiries: row.2,
        rejected_enquiries: row.3,
        negotiating_enquiries: row.4,
        average_offered_price,
        average_quantity,
    })
}
