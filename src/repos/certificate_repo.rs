use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CertificateRow {
    pub id: i64,
    pub human_id: i64,
    pub description: Option<String>,
    pub file_path: Option<String>,
    pub issued_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<CertificateRow>> {
    let rows = sqlx::query_as::<_, CertificateRow>(
        r#"
        SELECT id, human_id, description, file_path, issued_at, created_at
        FROM certificate
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn list_by_human(db: &PgPool, human_id: i64) -> RepoResult<Vec<CertificateRow>> {
    let rows = sqlx::query_as::<_, CertificateRow>(
        r#"
        SELECT id, human_id, description, file_path, issued_at, created_at
        FROM certificate
        WHERE human_id = $1
        ORDER BY id
        "#,
    )
    .bind(human_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<CertificateRow>> {
    let row = sqlx::query_as::<_, CertificateRow>(
        r#"
        SELECT id, human_id, description, file_path, issued_at, created_at
        FROM certificate
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    human_id: i64,
    description: Option<&str>,
    file_path: Option<&str>,
    issued_at: Option<NaiveDate>,
) -> RepoResult<CertificateRow> {
    let row = sqlx::query_as::<_, CertificateRow>(
        r#"
        INSERT INTO certificate (human_id, description, file_path, issued_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, human_id, description, file_path, issued_at, created_at
        "#,
    )
    .bind(human_id)
    .bind(description)
    .bind(file_path)
    .bind(issued_at)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    description: Option<&str>,
    file_path: Option<&str>,
    issued_at: Option<NaiveDate>,
) -> RepoResult<Option<CertificateRow>> {
    let row = sqlx::query_as::<_, CertificateRow>(
        r#"
        UPDATE certificate
        SET
            description = COALESCE($2, description),
            file_path = COALESCE($3, file_path),
            issued_at = COALESCE($4, issued_at)
        WHERE id = $1
        RETURNING id, human_id, description, file_path, issued_at, created_at
        "#,
    )
    .bind(id)
    .bind(description)
    .bind(file_path)
    .bind(issued_at)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM certificate WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
