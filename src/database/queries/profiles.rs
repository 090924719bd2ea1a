use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CreateProfileRequest, Profile, ProfileFilter, UpdateProfileRequest};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

pub async fn list(pool: &PgPool, filter: &ProfileFilter) -> Result<Vec<Profile>> {
    let mut qb = QueryBuilder::new("SELECT * FROM profiles WHERE 1=1");

    if let Some(user_id) = filter.user_id {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(location) = &filter.location {
        qb.push(" AND location ILIKE ")
            .push_bind(format!("%{}%", location));
    }
    if let Some(gst_number) = &filter.gst_number {
        qb.push(" AND gst_number = ").push_bind(gst_number);
    }
    qb.push(" ORDER BY id");

    let profiles = qb.build_query_as::<Profile>().fetch_all(pool).await?;
    Ok(profiles)
}

pub async fn insert(pool: &PgPool, req: &CreateProfileRequest) -> Result<Profile> {
    let profile = sqlx::query_as::<_, Profile>(
        "INSERT INTO profiles (user_id, gst_number, kyc_document, location, contact_info)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(req.user_id)
    .bind(&req.gst_number)
    .bind(&req.kyc_document)
    .bind(&req.location)
    .bind(&req.contact_info)
    .fetch_one(pool)
    .await?;
    Ok(profile)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateProfileRequest,
) -> Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(
        "UPDATE profiles SET
            gst_number = COALESCE($2, gst_number),
            kyc_document = COALESCE($3, kyc_document),
            location = COALESCE($4, location),
            contact_info = COALESCE($5, contact_info),
            rating = COALESCE($6, rating)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&req.gst_number)
    .bind(&req.kyc_document)
    .bind(&req.location)
    .bind(&req.contact_info)
    .bind(req.rating)
    .fetch_optional(pool)
    .await?;
    Ok(profile)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
