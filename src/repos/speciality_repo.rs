use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SpecialityRow {
    pub id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<SpecialityRow>> {
    let rows = sqlx::query_as::<_, SpecialityRow>(
        "SELECT id, description, created_at FROM speciality ORDER BY id",
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<SpecialityRow>> {
    let row = sqlx::query_as::<_, SpecialityRow>(
        "SELECT id, description, created_at FROM speciality WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(db: &PgPool, description: &str) -> RepoResult<SpecialityRow> {
    let row = sqlx::query_as::<_, SpecialityRow>(
        r#"
        INSERT INTO speciality (description)
        VALUES ($1)
        RETURNING id, description, created_at
        "#,
    )
    .bind(description)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    description: Option<&str>,
) -> RepoResult<Option<SpecialityRow>> {
    let row = sqlx::query_as::<_, SpecialityRow>(
        r#"
        UPDATE speciality
        SET description = COALESCE($2, description)
        WHERE id = $1
        RETURNING id, description, created_at
        "#,
    )
    .bind(id)
    .bind(description)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM speciality WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
