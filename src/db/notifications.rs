use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Notification;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    recipient_admin_id: Uuid,
    kind: &str,
    title: &str,
    message: &str,
    link_category: Option<&str>,
    reference_id: Option<Uuid>,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "INSERT INTO notifications (recipient_admin_id, kind, title, message, link_category, reference_id)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(recipient_admin_id)
    .bind(kind)
    .bind(title)
    .bind(message)
    .bind(link_category)
    .bind(reference_id)
    .fetch_one(executor)
    .await
}

pub async fn list_for_admin(
    pool: &PgPool,
    recipient_admin_id: Uuid,
    unread_only: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
    if unread_only {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications
             WHERE recipient_admin_id = $1 AND is_read = FALSE
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(recipient_admin_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications
             WHERE recipient_admin_id = $1
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(recipient_admin_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}

pub async fn unread_count(pool: &PgPool, recipient_admin_id: Uuid) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM notifications WHERE recipient_admin_id = $1 AND is_read = FALSE",
    )
    .bind(recipient_admin_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Scoped to the recipient; returns false when the id exists but belongs to
/// someone else, which the routes surface as 404.
pub async fn mark_read(
    pool: &PgPool,
    id: Uuid,
    recipient_admin_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND recipient_admin_id = $2",
    )
    .bind(id)
    .bind(recipient_admin_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn mark_all_read(pool: &PgPool, recipient_admin_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE notifications SET is_read = TRUE WHERE recipient_admin_id = $1 AND is_read = FALSE",
    )
    .bind(recipient_admin_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(
    pool: &PgPool,
    id: Uuid,
    recipient_admin_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM notifications WHERE id = $1 AND recipient_admin_id = $2",
    )
    .bind(id)
    .bind(recipient_admin_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
