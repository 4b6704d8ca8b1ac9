/*
 * Responsibility
 * - users テーブル (end-user account) 向け SQLx 操作
 * - password hash は login 用の専用 row でのみ返す
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub human_id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct UserCredentialsRow {
    pub id: i64,
    pub human_id: i64,
    pub encrypted_password: String,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<UserRow>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, human_id, email, created_at
        FROM users
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn list_by_human(db: &PgPool, human_id: i64) -> RepoResult<Vec<UserRow>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, human_id, email, created_at
        FROM users
        WHERE human_id = $1
        ORDER BY id
        "#,
    )
    .bind(human_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, human_id, email, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn find_credentials(db: &PgPool, email: &str) -> RepoResult<Option<UserCredentialsRow>> {
    let row = sqlx::query_as::<_, UserCredentialsRow>(
        r#"
        SELECT id, human_id, encrypted_password
        FROM users
        WHERE email = $1
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    human_id: i64,
    email: &str,
    password_hash: &str,
) -> RepoResult<UserRow> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (human_id, email, encrypted_password)
        VALUES ($1, $2, $3)
        RETURNING id, human_id, email, created_at
        "#,
    )
    .bind(human_id)
    .bind(email)
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    email: Option<&str>,
    password_hash: Option<&str>,
) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET
            email = COALESCE($2, email),
            encrypted_password = COALESCE($3, encrypted_password)
        WHERE id = $1
        RETURNING id, human_id, email, created_at
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
