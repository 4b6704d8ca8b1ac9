use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FacialRow {
    pub id: i64,
    pub human_id: i64,
    pub facial_data_hash: String,
    pub facial_validation: bool,
    pub created_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<FacialRow>> {
    let rows = sqlx::query_as::<_, FacialRow>(
        r#"
        SELECT id, human_id, facial_data_hash, facial_validation, created_at
        FROM facial_recognition
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn list_by_human(db: &PgPool, human_id: i64) -> RepoResult<Vec<FacialRow>> {
    let rows = sqlx::query_as::<_, FacialRow>(
        r#"
        SELECT id, human_id, facial_data_hash, facial_validation, created_at
        FROM facial_recognition
        WHERE human_id = $1
        ORDER BY id
        "#,
    )
    .bind(human_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<FacialRow>> {
    let row = sqlx::query_as::<_, FacialRow>(
        r#"
        SELECT id, human_id, facial_data_hash, facial_validation, created_at
        FROM facial_recognition
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

// New hashes always start unvalidated.
pub async fn create(db: &PgPool, human_id: i64, facial_data_hash: &str) -> RepoResult<FacialRow> {
    let row = sqlx::query_as::<_, FacialRow>(
        r#"
        INSERT INTO facial_recognition (human_id, facial_data_hash, facial_validation)
        VALUES ($1, $2, FALSE)
        RETURNING id, human_id, facial_data_hash, facial_validation, created_at
        "#,
    )
    .bind(human_id)
    .bind(facial_data_hash)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn set_validation(db: &PgPool, id: i64, validated: bool) -> RepoResult<Option<FacialRow>> {
    let row = sqlx::query_as::<_, FacialRow>(
        r#"
        UPDATE facial_recognition
        SET facial_validation = $2
        WHERE id = $1
        RETURNING id, human_id, facial_data_hash, facial_validation, created_at
        "#,
    )
    .bind(id)
    .bind(validated)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM facial_recognition WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
