use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::ChangeRecord;

pub async fn create(
    pool: &PgPool,
    organization_id: Uuid,
    section: &str,
    previous_data: &serde_json::Value,
    proposed_data: &serde_json::Value,
    submitted_by: Uuid,
    submitted_by_name: &str,
) -> Result<ChangeRecord, sqlx::Error> {
    sqlx::query_as::<_, ChangeRecord>(
        "INSERT INTO change_records
            (organization_id, section, previous_data, proposed_data, submitted_by, submitted_by_name)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(organization_id)
    .bind(section)
    .bind(previous_data)
    .bind(proposed_data)
    .bind(submitted_by)
    .bind(submitted_by_name)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ChangeRecord>, sqlx::Error> {
    sqlx::query_as::<_, ChangeRecord>("SELECT * FROM change_records WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Row-locked fetch for review transitions. Callers hold the lock until the
/// surrounding transaction commits, so two concurrent reviews serialize here.
pub async fn lock_for_review<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<ChangeRecord>, sqlx::Error> {
    sqlx::query_as::<_, ChangeRecord>("SELECT * FROM change_records WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn mark_reviewed<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    status: &str,
    reviewed_by: Uuid,
    review_note: Option<&str>,
) -> Result<ChangeRecord, sqlx::Error> {
    sqlx::query_as::<_, ChangeRecord>(
        "UPDATE change_records
         SET status = $2, reviewed_by = $3, reviewed_at = NOW(), review_note = $4
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .bind(reviewed_by)
    .bind(review_note)
    .fetch_one(executor)
    .await
}

pub async fn mark_cancelled<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<ChangeRecord, sqlx::Error> {
    sqlx::query_as::<_, ChangeRecord>(
        "UPDATE change_records SET status = 'cancelled' WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_one(executor)
    .await
}

pub async fn update_proposed<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    proposed_data: &serde_json::Value,
) -> Result<ChangeRecord, sqlx::Error> {
    sqlx::query_as::<_, ChangeRecord>(
        "UPDATE change_records SET proposed_data = $2, submitted_at = NOW()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(proposed_data)
    .fetch_one(executor)
    .await
}

#[derive(Default)]
pub struct ListParams {
    pub organization_id: Option<Uuid>,
    pub submitted_by: Option<Uuid>,
    pub status: Option<String>,
    pub section: Option<String>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, params: &ListParams) {
    if let Some(organization_id) = params.organization_id {
        builder.push(" AND organization_id = ").push_bind(organization_id);
    }
    if let Some(submitted_by) = params.submitted_by {
        builder.push(" AND submitted_by = ").push_bind(submitted_by);
    }
    if let Some(status) = &params.status {
        builder.push(" AND status = ").push_bind(status.clone());
    }
    if let Some(section) = &params.section {
        builder.push(" AND section = ").push_bind(section.clone());
    }
    if let Some(search) = &params.search {
        let pattern = format!("%{search}%");
        builder
            .push(" AND (submitted_by_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR proposed_data::text ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<ChangeRecord>, sqlx::Error> {
    let mut builder =
        QueryBuilder::<Postgres>::new("SELECT * FROM change_records WHERE 1=1");
    push_filters(&mut builder, params);
    builder
        .push(" ORDER BY submitted_at DESC LIMIT ")
        .push_bind(params.limit)
        .push(" OFFSET ")
        .push_bind(params.offset);
    builder
        .build_query_as::<ChangeRecord>()
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &PgPool, params: &ListParams) -> Result<i64, sqlx::Error> {
    let mut builder =
        QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM change_records WHERE 1=1");
    push_filters(&mut builder, params);
    let row: (i64,) = builder.build_query_as().fetch_one(pool).await?;
    Ok(row.0)
}

/// Cancels the pending subset of the submitter's own records; everything else
/// in `ids` is left untouched. Returns how many rows actually flipped.
pub async fn bulk_cancel(
    pool: &PgPool,
    ids: &[Uuid],
    submitted_by: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE change_records SET status = 'cancelled'
         WHERE id = ANY($1) AND submitted_by = $2 AND status = 'pending'",
    )
    .bind(ids)
    .bind(submitted_by)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn bulk_delete(
    pool: &PgPool,
    ids: &[Uuid],
    organization_id: Option<Uuid>,
) -> Result<u64, sqlx::Error> {
    let result = if let Some(organization_id) = organization_id {
        sqlx::query("DELETE FROM change_records WHERE id = ANY($1) AND organization_id = $2")
            .bind(ids)
            .bind(organization_id)
            .execute(pool)
            .await?
    } else {
        sqlx::query("DELETE FROM change_records WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?
    };
    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM change_records WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
