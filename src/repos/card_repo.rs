/*
 * Responsibility
 * - card テーブル向け SQLx 操作
 * - 一覧系 (list / list_by_human) は account_number を返さない
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CardRow {
    pub id: i64,
    pub human_id: i64,
    pub bank: Option<String>,
    pub account_type: Option<String>,
    pub account_number: String,
    pub expiration_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CardSummaryRow {
    pub id: i64,
    pub human_id: i64,
    pub bank: Option<String>,
    pub account_type: Option<String>,
    pub expiration_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct CardFields<'a> {
    pub bank: Option<&'a str>,
    pub account_type: Option<&'a str>,
    pub account_number: Option<&'a str>,
    pub expiration_date: Option<&'a str>,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<CardSummaryRow>> {
    let rows = sqlx::query_as::<_, CardSummaryRow>(
        r#"
        SELECT id, human_id, bank, account_type, expiration_date, created_at
        FROM card
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn list_by_human(db: &PgPool, human_id: i64) -> RepoResult<Vec<CardSummaryRow>> {
    let rows = sqlx::query_as::<_, CardSummaryRow>(
        r#"
        SELECT id, human_id, bank, account_type, expiration_date, created_at
        FROM card
        WHERE human_id = $1
        ORDER BY id
        "#,
    )
    .bind(human_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<CardRow>> {
    let row = sqlx::query_as::<_, CardRow>(
        r#"
        SELECT id, human_id, bank, account_type, account_number, expiration_date, created_at
        FROM card
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
    account_number: &str,
    fields: &CardFields<'_>,
) -> RepoResult<CardRow> {
    let row = sqlx::query_as::<_, CardRow>(
        r#"
        INSERT INTO card (human_id, bank, account_type, account_number, expiration_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, human_id, bank, account_type, account_number, expiration_date, created_at
        "#,
    )
    .bind(human_id)
    .bind(fields.bank)
    .bind(fields.account_type)
    .bind(account_number)
    .bind(fields.expiration_date)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(db: &PgPool, id: i64, fields: &CardFields<'_>) -> RepoResult<Option<CardRow>> {
    let row = sqlx::query_as::<_, CardRow>(
        r#"
        UPDATE card
        SET
            bank = COALESCE($2, bank),
            account_type = COALESCE($3, account_type),
            account_number = COALESCE($4, account_number),
            expiration_date = COALESCE($5, expiration_date)
        WHERE id = $1
        RETURNING id, human_id, bank, account_type, account_number, expiration_date, created_at
        "#,
    )
    .bind(id)
    .bind(fields.bank)
    .bind(fields.account_type)
    .bind(fields.account_number)
    .bind(fields.expiration_date)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM card WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
