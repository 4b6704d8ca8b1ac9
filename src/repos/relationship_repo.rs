/*
 * Responsibility
 * - human_skill / skill_speciality の link テーブル
 * - 既に存在する link の再作成は Conflict
 */
use sqlx::PgPool;

use crate::repos::error::{RepoError, RepoResult};

pub async fn link_human_skill(db: &PgPool, human_id: i64, skill_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT INTO human_skill (human_id, skill_id) VALUES ($1, $2)")
        .bind(human_id)
        .bind(skill_id)
        .execute(db)
        .await
        .map_err(RepoError::from_sqlx)?;

    Ok(())
}

pub async fn unlink_human_skill(db: &PgPool, human_id: i64, skill_id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM human_skill WHERE human_id = $1 AND skill_id = $2")
        .bind(human_id)
        .bind(skill_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn link_skill_speciality(
    db: &PgPool,
    skill_id: i64,
    speciality_id: i64,
) -> RepoResult<()> {
    sqlx::query("INSERT INTO skill_speciality (skill_id, speciality_id) VALUES ($1, $2)")
        .bind(skill_id)
        .bind(speciality_id)
        .execute(db)
        .await
        .map_err(RepoError::from_sqlx)?;

    Ok(())
}

pub async fn unlink_skill_speciality(
    db: &PgPool,
    skill_id: i64,
    speciality_id: i64,
) -> RepoResult<bool> {
    let result =
        sqlx::query("DELETE FROM skill_speciality WHERE skill_id = $1 AND speciality_id = $2")
            .bind(skill_id)
            .bind(speciality_id)
            .execute(db)
            .await?;

    Ok(result.rows_affected() > 0)
}
