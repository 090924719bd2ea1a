use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CommodityType, CreateProductRequest, Product, ProductFilter, ProductStats,
    UpdateProductRequest,
};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

pub async fn list(pool: &PgPool, filter: &ProductFilter) -> Result<Vec<Product>> {
    let mut qb = QueryBuilder::new("SELECT * FROM products WHERE 1=1");

    if let Some(commodity_type) = &filter.commodity_type {
        qb.push(" AND commodity_type = ").push_bind(commodity_type);
    }
    if let Some(seller_id) = filter.seller_id {
        qb.push(" AND seller_id = ").push_bind(seller_id);
    }
    if let Some(min_price) = filter.min_price {
        qb.push(" AND price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        qb.push(" AND price <= ").push_bind(max_price);
    }
    if let Some(location) = &filter.location {
        qb.push(" AND pickup_location ILIKE ")
            .push_bind(format!("%{}%", location));
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (commodity_type ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR pickup_location ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    qb.push(" ORDER BY created_at DESC");

    let products = qb.build_query_as::<Product>().fetch_all(pool).await?;
    Ok(products)
}

pub async fn insert(
    pool: &PgPool,
    seller_id: Uuid,
    req: &CreateProductRequest,
) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products
            (seller_id, commodity_type, quantity, price, unit_of_measure,
             availability_dates, pickup_location)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(seller_id)
    .bind(&req.commodity_type)
    .bind(req.quantity)
    .bind(req.price)
    .bind(&req.unit_of_measure)
    .bind(&req.availability_dates)
    .bind(&req.pickup_location)
    .fetch_one(pool)
    .await?;
    Ok(product)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateProductRequest,
) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET
            commodity_type = COALESCE($2, commodity_type),
            quantity = COALESCE($3, quantity),
            price = COALESCE($4, price),
            unit_of_measure = COALESCE($5, unit_of_measure),
            availability_dates = COALESCE($6, availability_dates),
            pickup_location = COALESCE($7, pickup_location),
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&req.commodity_type)
    .bind(req.quantity)
    .bind(req.price)
    .bind(&req.unit_of_measure)
    .bind(&req.availability_dates)
    .bind(&req.pickup_location)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn stats(pool: &PgPool) -> Result<ProductStats> {
    let total_products = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    let total_sellers =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT seller_id) FROM products")
            .fetch_one(pool)
            .await?;

    let mut commodity_stats: HashMap<String, i64> = CommodityType::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), 0))
        .collect();
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT commodity_type, COUNT(*) FROM products GROUP BY commodity_type",
    )
    .fetch_all(pool)
    .await?;
    for (commodity, count) in rows {
        commodity_stats.insert(commodity, count);
    }

    let average_price =
        sqlx::query_scalar::<_, Option<Decimal>>("SELECT AVG(price) FROM products")
            .fetch_one(pool)
            .await?;
    let total_quantity =
        sqlx::query_scalar::<_, Option<f64>>("SELECT SUM(quantity) FROM products")
            .fetch_one(pool)
            .await?;

    Ok(ProductStats {
        total_products,
        total_sellers,
        commodity_stats,
        average_price,
        total_quantity,
    })
}
