use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Admin;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    organization_id: Option<Uuid>,
    email: &str,
    password_hash: &str,
    name: &str,
    is_superadmin: bool,
) -> Result<Admin, sqlx::Error> {
    sqlx::query_as::<_, Admin>(
        "INSERT INTO admins (organization_id, email, password_hash, name, is_superadmin)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(organization_id)
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(is_superadmin)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_all<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admins")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>("SELECT * FROM admins ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_by_organization(
    pool: &PgPool,
    organization_id: Uuid,
) -> Result<Vec<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(
        "SELECT * FROM admins WHERE organization_id = $1 ORDER BY created_at DESC",
    )
    .bind(organization_id)
    .fetch_all(pool)
    .await
}

pub async fn update_password(
    pool: &PgPool,
    id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM admins WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
