use sqlx::{PgPool, QueryBuilder};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CreateRouteRequest, Route, RouteFilter, RouteNetwork, RouteStats, UpdateRouteRequest,
};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Route>> {
    let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(route)
}

pub async fn list(pool: &PgPool, filter: &RouteFilter) -> Result<Vec<Route>> {
    let mut qb = QueryBuilder::new("SELECT * FROM routes WHERE 1=1");

    if let Some(transporter_id) = filter.transporter_id {
        qb.push(" AND transporter_id = ").push_bind(transporter_id);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (origin ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR destination ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    qb.push(" ORDER BY created_at DESC");

    let routes = qb.build_query_as::<Route>().fetch_all(pool).await?;
    Ok(routes)
}

pub async fn list_by_transporter(pool: &PgPool, transporter_id: Uuid) -> Result<Vec<Route>> {
    let routes = sqlx::query_as::<_, Route>(
        "SELECT * FROM routes WHERE transporter_id = $1 ORDER BY created_at DESC",
    )
    .bind(transporter_id)
    .fetch_all(pool)
    .await?;
    Ok(routes)
}

pub async fn insert(
    pool: &PgPool,
    transporter_id: Uuid,
    req: &CreateRouteRequest,
) -> Result<Route> {
    let route = sqlx::query_as::<_, Route>(
        "INSERT INTO routes (transporter_id, origin, destination)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(transporter_id)
    .bind(&req.origin)
    .bind(&req.destination)
    .fetch_one(pool)
    .await?;
    Ok(route)
}

pub async fn update(pool: &PgPool, id: Uuid, req: &UpdateRouteRequest) -> Result<Option<Route>> {
    let route = sqlx::query_as::<_, Route>(
        "UPDATE routes SET
            origin = COALESCE($2, origin),
            destination = COALESCE($3, destination)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&req.origin)
    .bind(&req.destination)
    .fetch_optional(pool)
    .await?;
    Ok(route)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM routes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn stats(pool: &PgPool) -> Result<RouteStats> {
    let row = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*), COUNT(DISTINCT transporter_id) FROM routes",
    )
    .fetch_one(pool)
    .await?;

    Ok(RouteStats {
        total_routes: row.0,
        total_transporters: row.1,
    })
}

pub async fn network(pool: &PgPool) -> Result<RouteNetwork> {
    let row = sqlx::query_as::<_, (i64, i64, i64)>(
        "SELECT COUNT(*), COUNT(DISTINCT origin), COUNT(DISTINCT destination) FROM routes",
    )
    .fetch_one(pool)
    .await?;

    let endpoints =
        sqlx::query_as::<_, (String, String)>("SELECT origin, destination FROM routes")
            .fetch_all(pool)
            .await?;
    let mut locations = BTreeSet::new();
    for (origin, destination) in endpoints {
        locations.insert(origin);
        locations.insert(destination);
    }

    Ok(RouteNetwork {
        total_routes: row.0,
        unique_origins: row.1,
        unique_destinations: row.2,
        total_locations: locations.len() as i64,
        locations: locations.into_iter().collect(),
    })
}

/// Routes two transporters both serve, matched on exact origin and
/// destination. Returns the first transporter's copy of each match.
pub fn find_common_routes(first: &[Route], second: &[Route]) -> Vec<Route> {
    let mut common = Vec::new();
    for route in first {
        for other in second {
            if route.origin == other.origin && route.destination == other.destination {
                common.push(route.clone());
                break;
            }
        }
    }
    common
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn route(transporter_id: Uuid, origin: &str, destination: &str) -> Route {
        Route {
            id: Uuid::new_v4(),
            transporter_id,
            origin: origin.to_string(),
            destination: destination.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_find_common_routes() {
        let t1 = Uuid::new_v4();
        let t2 = Uuid::new_v4();
        let first = vec![
            route(t1, "Pune", "Mumbai"),
            route(t1, "Nagpur", "Delhi"),
            route(t1, "Surat", "Ahmedabad"),
        ];
        let second = vec![
            route(t2, "Pune", "Mumbai"),
            route(t2, "Surat", "Ahmedabad"),
            route(t2, "Jaipur", "Delhi"),
        ];

        let common = find_common_routes(&first, &second);
        assert_eq!(common.len(), 2);
        assert_eq!(common[0].origin, "Pune");
        assert_eq!(common[1].origin, "Surat");
        // Matches come from the first transporter's list
        assert!(common.iter().all(|r| r.transporter_id == t1));
    }

    #[test]
    fn test_find_common_routes_no_overlap() {
        let t1 = Uuid::new_v4();
        let t2 = Uuid::new_v4();
        let first = vec![route(t1, "Pune", "Mumbai")];
        let second = vec![route(t2, "Mumbai", "Pune")];

        assert!(find_common_routes(&first, &second).is_empty());
        assert!(find_common_routes(&[], &second).is_empty());
    }

    #[test]
    fn test_duplicate_routes_counted_once() {
        let t1 = Uuid::new_v4();
        let t2 = Uuid::new_v4();
        let first = vec![route(t1, "Pune", "Mumbai")];
        let second = vec![
            route(t2, "Pune", "Mumbai"),
            route(t2, "Pune", "Mumbai"),
        ];

        assert_eq!(find_common_routes(&first, &second).len(), 1);
    }
}
