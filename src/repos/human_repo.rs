/*
 * Responsibility
 * - human テーブル向け SQLx 操作
 * - 子テーブルは FK (ON DELETE CASCADE) 前提で削除挙動を意識
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HumanRow {
    pub id: i64,
    pub unique_id: Option<String>,
    pub legal_id: Option<String>,
    pub name: String,
    pub lastname: String,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct NewHuman<'a> {
    pub unique_id: Option<&'a str>,
    pub legal_id: Option<&'a str>,
    pub name: &'a str,
    pub lastname: &'a str,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<&'a str>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct HumanChanges<'a> {
    pub unique_id: Option<&'a str>,
    pub legal_id: Option<&'a str>,
    pub name: Option<&'a str>,
    pub lastname: Option<&'a str>,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<&'a str>,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<HumanRow>> {
    let rows = sqlx::query_as::<_, HumanRow>(
        r#"
        SELECT id, unique_id, legal_id, name, lastname, birthdate, gender, created_at, updated_at
        FROM human
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, new: &NewHuman<'_>) -> RepoResult<HumanRow> {
    let row = sqlx::query_as::<_, HumanRow>(
        r#"
        INSERT INTO human (unique_id, legal_id, name, lastname, birthdate, gender)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, unique_id, legal_id, name, lastname, birthdate, gender, created_at, updated_at
        "#,
    )
    .bind(new.unique_id)
    .bind(new.legal_id)
    .bind(new.name)
    .bind(new.lastname)
    .bind(new.birthdate)
    .bind(new.gender)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<HumanRow>> {
    let row = sqlx::query_as::<_, HumanRow>(
        r#"
        SELECT id, unique_id, legal_id, name, lastname, birthdate, gender, created_at, updated_at
        FROM human
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    changes: &HumanChanges<'_>,
) -> RepoResult<Option<HumanRow>> {
    let row = sqlx::query_as::<_, HumanRow>(
        r#"
        UPDATE human
        SET
            unique_id = COALESCE($2, unique_id),
            legal_id = COALESCE($3, legal_id),
            name = COALESCE($4, name),
            lastname = COALESCE($5, lastname),
            birthdate = COALESCE($6, birthdate),
            gender = COALESCE($7, gender),
            updated_at = now()
        WHERE id = $1
        RETURNING id, unique_id, legal_id, name, lastname, birthdate, gender, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(changes.unique_id)
    .bind(changes.legal_id)
    .bind(changes.name)
    .bind(changes.lastname)
    .bind(changes.birthdate)
    .bind(changes.gender)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM human
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
