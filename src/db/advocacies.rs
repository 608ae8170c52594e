use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Advocacy;

pub async fn find_by_org(
    pool: &PgPool,
    organization_id: Uuid,
) -> Result<Option<Advocacy>, sqlx::Error> {
    sqlx::query_as::<_, Advocacy>("SELECT * FROM advocacies WHERE organization_id = $1")
        .bind(organization_id)
        .fetch_optional(pool)
        .await
}

/// One advocacy row per organization; approving a change replaces it wholesale.
pub async fn upsert<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    organization_id: Uuid,
    content: &str,
) -> Result<Advocacy, sqlx::Error> {
    sqlx::query_as::<_, Advocacy>(
        "INSERT INTO advocacies (organization_id, content) VALUES ($1, $2)
         ON CONFLICT (organization_id)
         DO UPDATE SET content = EXCLUDED.content, updated_at = NOW()
         RETURNING *",
    )
    .bind(organization_id)
    .bind(content)
    .fetch_one(executor)
    .await
}
