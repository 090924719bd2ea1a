use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CreateTransactionRequest, Transaction, TransactionFilter, TransactionStats,
    UpdateTransactionRequest,
};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Transaction>> {
    let transaction = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(transaction)
}

pub async fn find_by_order(pool: &PgPool, order_id: Uuid) -> Result<Option<Transaction>> {
    let transaction =
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE order_id = $1")
            .bind(order_id)
            .fetch_optional(pool)
            .await?;
    Ok(transaction)
}

pub async fn list(pool: &PgPool, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
    let mut qb = QueryBuilder::new("SELECT * FROM transactions WHERE 1=1");

    if let Some(order_id) = filter.order_id {
        qb.push(" AND order_id = ").push_bind(order_id);
    }
    if let Some(min_amount) = filter.min_amount {
        qb.push(" AND amount >= ").push_bind(min_amount);
    }
    if let Some(max_amount) = filter.max_amount {
        qb.push(" AND amount <= ").push_bind(max_amount);
    }
    qb.push(" ORDER BY created_at DESC");

    let transactions = qb.build_query_as::<Transaction>().fetch_all(pool).await?;
    Ok(transactions)
}

pub async fn insert(pool: &PgPool, req: &CreateTransactionRequest) -> Result<Transaction> {
    let transaction = sqlx::query_as::<_, Transaction>(
        "INSERT INTO transactions (order_id, amount, invoice_number)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(req.order_id)
    .bind(req.amount)
    .bind(&req.invoice_number)
    .fetch_one(pool)
    .await?;
    Ok(transaction)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateTransactionRequest,
) -> Result<Option<Transaction>> {
    let transaction = sqlx::query_as::<_, Transaction>(
        "UPDATE transactions SET
            amount = COALESCE($2, amount),
            invoice_number = COALESCE($3, invoice_number)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(req.amount)
    .bind(&req.invoice_number)
    .fetch_optional(pool)
    .await?;
    Ok(transaction)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn stats(pool: &PgPool) -> Result<TransactionStats> {
    let total_transactions = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
        .fetch_one(pool)
        .await?;
    let total_amount =
        sqlx::query_scalar::<_, Option<Decimal>>("SELECT SUM(amount) FROM transactions")
            .fetch_one(pool)
            .await?;
    let average_amount =
        sqlx::query_scalar::<_, Option<Decimal>>("SELECT AVG(amount) FROM transactions")
            .fetch_one(pool)
            .await?;

    Ok(TransactionStats {
        total_transactions,
        total_amount,
        average_amount,
    })
}
