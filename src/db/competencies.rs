use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Competency;

pub async fn find_by_org(
    pool: &PgPool,
    organization_id: Uuid,
) -> Result<Option<Competency>, sqlx::Error> {
    sqlx::query_as::<_, Competency>("SELECT * FROM competencies WHERE organization_id = $1")
        .bind(organization_id)
        .fetch_optional(pool)
        .await
}

pub async fn upsert<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    organization_id: Uuid,
    content: &str,
) -> Result<Competency, sqlx::Error> {
    sqlx::query_as::<_, Competency>(
        "INSERT INTO competencies (organization_id, content) VALUES ($1, $2)
         ON CONFLICT (organization_id)
         DO UPDATE SET content = EXCLUDED.content, updated_at = NOW()
         RETURNING *",
    )
    .bind(organization_id)
    .bind(content)
    .fetch_one(executor)
    .await
}
