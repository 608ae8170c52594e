use sqlx::PgPool;
use uuid::Uuid;

use crate::models::OrgHead;

pub async fn list_by_org<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    organization_id: Uuid,
) -> Result<Vec<OrgHead>, sqlx::Error> {
    sqlx::query_as::<_, OrgHead>(
        "SELECT * FROM org_heads WHERE organization_id = $1 ORDER BY created_at",
    )
    .bind(organization_id)
    .fetch_all(executor)
    .await
}

pub async fn insert<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    organization_id: Uuid,
    name: &str,
    position: &str,
    email: &str,
    facebook: &str,
    photo: &str,
) -> Result<OrgHead, sqlx::Error> {
    sqlx::query_as::<_, OrgHead>(
        "INSERT INTO org_heads (organization_id, name, position, email, facebook, photo)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(organization_id)
    .bind(name)
    .bind(position)
    .bind(email)
    .bind(facebook)
    .bind(photo)
    .fetch_one(executor)
    .await
}

/// Scoped to the organization so a stray id can never touch another org's roster.
pub async fn update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    organization_id: Uuid,
    name: &str,
    position: &str,
    email: &str,
    facebook: &str,
    photo: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE org_heads SET name = $3, position = $4, email = $5, facebook = $6, photo = $7
         WHERE id = $1 AND organization_id = $2",
    )
    .bind(id)
    .bind(organization_id)
    .bind(name)
    .bind(position)
    .bind(email)
    .bind(facebook)
    .bind(photo)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_many<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    organization_id: Uuid,
    ids: &[Uuid],
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM org_heads WHERE organization_id = $1 AND id = ANY($2)")
        .bind(organization_id)
        .bind(ids)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_by_org(pool: &PgPool, organization_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM org_heads WHERE organization_id = $1")
        .bind(organization_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
