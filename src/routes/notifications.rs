use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthAdmin;
use crate::db;
use crate::error::AppError;
use crate::models::Notification;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Always scoped to the authenticated admin; there is no cross-admin view.
pub async fn list(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);

    let notifications = db::notifications::list_for_admin(
        &state.pool,
        auth.admin_id,
        query.unread_only.unwrap_or(false),
        limit,
        offset,
    )
    .await?;
    Ok(Json(notifications))
}

pub async fn unread_count(
    auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let count = db::notifications::unread_count(&state.pool, auth.admin_id).await?;
    Ok(Json(serde_json::json!({ "count": count })))
}

pub async fn mark_read(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = db::notifications::mark_read(&state.pool, id, auth.admin_id).await?;
    if !updated {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Marked as read" })))
}

/// Called when the notification panel opens.
pub async fn read_all(
    auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = db::notifications::mark_all_read(&state.pool, auth.admin_id).await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}

pub async fn delete(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::notifications::delete(&state.pool, id, auth.admin_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
