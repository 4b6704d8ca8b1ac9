use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkillRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<SkillRow>> {
    let rows = sqlx::query_as::<_, SkillRow>(
        "SELECT id, name, description, created_at FROM skill ORDER BY id",
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

// through human_skill
pub async fn list_by_human(db: &PgPool, human_id: i64) -> RepoResult<Vec<SkillRow>> {
    let rows = sqlx::query_as::<_, SkillRow>(
        r#"
        SELECT s.id, s.name, s.description, s.created_at
        FROM skill s
        JOIN human_skill hs ON hs.skill_id = s.id
        WHERE hs.human_id = $1
        ORDER BY s.id
        "#,
    )
    .bind(human_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<SkillRow>> {
    let row = sqlx::query_as::<_, SkillRow>(
        "SELECT id, name, description, created_at FROM skill WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(db: &PgPool, name: &str, description: Option<&str>) -> RepoResult<SkillRow> {
    let row = sqlx::query_as::<_, SkillRow>(
        r#"
        INSERT INTO skill (name, description)
        VALUES ($1, $2)
        RETURNING id, name, description, created_at
        "#,
    )
    .bind(name)
    .bind(description)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    name: Option<&str>,
    description: Option<&str>,
) -> RepoResult<Option<SkillRow>> {
    let row = sqlx::query_as::<_, SkillRow>(
        r#"
        UPDATE skill
        SET
            name = COALESCE($2, name),
            description = COALESCE($3, description)
        WHERE id = $1
        RETURNING id, name, description, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM skill WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
