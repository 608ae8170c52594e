use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Organization;
use crate::review::diff::OrgInfoFields;

pub async fn create(
    pool: &PgPool,
    acronym: &str,
    name: &str,
    email: &str,
) -> Result<Organization, sqlx::Error> {
    sqlx::query_as::<_, Organization>(
        "INSERT INTO organizations (acronym, name, email) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(acronym)
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Organization>, sqlx::Error> {
    sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_acronym(
    pool: &PgPool,
    acronym: &str,
) -> Result<Option<Organization>, sqlx::Error> {
    sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE acronym = $1")
        .bind(acronym)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Organization>, sqlx::Error> {
    sqlx::query_as::<_, Organization>("SELECT * FROM organizations ORDER BY acronym")
        .fetch_all(pool)
        .await
}

/// Partial update: only fields carried by `fields` change, the rest keep
/// their current value via COALESCE.
pub async fn update_profile<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    fields: &OrgInfoFields,
) -> Result<Organization, sqlx::Error> {
    sqlx::query_as::<_, Organization>(
        "UPDATE organizations SET
            logo = COALESCE($2, logo),
            acronym = COALESCE($3, acronym),
            name = COALESCE($4, name),
            email = COALESCE($5, email),
            facebook = COALESCE($6, facebook),
            description = COALESCE($7, description)
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(fields.logo.as_deref())
    .bind(fields.acronym.as_deref())
    .bind(fields.name.as_deref())
    .bind(fields.email.as_deref())
    .bind(fields.facebook.as_deref())
    .bind(fields.description.as_deref())
    .fetch_one(executor)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM organizations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
