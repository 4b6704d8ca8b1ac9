use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SpaceTimeRow {
    pub id: i64,
    pub human_id: i64,
    pub longitude: String,
    pub latitude: String,
    pub timestamp: DateTime<Utc>,
}

/// Newest first.
pub async fn latest(db: &PgPool, limit: i64) -> RepoResult<Vec<SpaceTimeRow>> {
    let rows = sqlx::query_as::<_, SpaceTimeRow>(
        r#"
        SELECT id, human_id, longitude, latitude, timestamp
        FROM space_time
        ORDER BY timestamp DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn latest_for_human(
    db: &PgPool,
    human_id: i64,
    limit: i64,
) -> RepoResult<Vec<SpaceTimeRow>> {
    let rows = sqlx::query_as::<_, SpaceTimeRow>(
        r#"
        SELECT id, human_id, longitude, latitude, timestamp
        FROM space_time
        WHERE human_id = $1
        ORDER BY timestamp DESC
        LIMIT $2
        "#,
    )
    .bind(human_id)
    .bind(limit)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<SpaceTimeRow>> {
    let row = sqlx::query_as::<_, SpaceTimeRow>(
        "SELECT id, human_id, longitude, latitude, timestamp FROM space_time WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

// A missing timestamp records the time of insertion.
pub async fn create(
    db: &PgPool,
    human_id: i64,
    longitude: &str,
    latitude: &str,
    timestamp: Option<DateTime<Utc>>,
) -> RepoResult<SpaceTimeRow> {
    let row = sqlx::query_as::<_, SpaceTimeRow>(
        r#"
        INSERT INTO space_time (human_id, longitude, latitude, timestamp)
        VALUES ($1, $2, $3, COALESCE($4, now()))
        RETURNING id, human_id, longitude, latitude, timestamp
        "#,
    )
    .bind(human_id)
    .bind(longitude)
    .bind(latitude)
    .bind(timestamp)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    longitude: Option<&str>,
    latitude: Option<&str>,
    timestamp: Option<DateTime<Utc>>,
) -> RepoResult<Option<SpaceTimeRow>> {
    let row = sqlx::query_as::<_, SpaceTimeRow>(
        r#"
        UPDATE space_time
        SET
            longitude = COALESCE($2, longitude),
            latitude = COALESCE($3, latitude),
            timestamp = COALESCE($4, timestamp)
        WHERE id = $1
        RETURNING id, human_id, longitude, latitude, timestamp
        "#,
    )
    .bind(id)
    .bind(longitude)
    .bind(latitude)
    .bind(timestamp)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM space_time WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
