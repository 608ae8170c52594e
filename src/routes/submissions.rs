use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthAdmin;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{ChangeRecord, ChangeStatus, Section};
use crate::review;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateSubmission {
    pub organization_id: Uuid,
    pub section: String,
    pub previous_data: serde_json::Value,
    pub proposed_data: serde_json::Value,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub section: Option<String>,
    pub organization_id: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSubmission {
    pub proposed_data: serde_json::Value,
}

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub status: String,
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct BulkIds {
    pub ids: Vec<Uuid>,
}

/// Filters arrive as wire strings; round-trip them through the enums so a
/// typo'd filter is a 400 instead of a silently empty result.
fn parse_filters(query: &ListQuery) -> Result<(Option<String>, Option<String>), AppError> {
    let status = match query.status.as_deref() {
        None => None,
        Some(s) => Some(
            ChangeStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown status filter: {s}")))?
                .as_str()
                .to_string(),
        ),
    };
    let section = match query.section.as_deref() {
        None => None,
        Some(s) => Some(
            Section::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown section filter: {s}")))?
                .as_str()
                .to_string(),
        ),
    };
    Ok((status, section))
}

fn paginate(query: &ListQuery) -> (i64, i64, i64) {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;
    (page, per_page, offset)
}

fn list_envelope(
    records: Vec<ChangeRecord>,
    total: i64,
    page: i64,
    per_page: i64,
) -> serde_json::Value {
    serde_json::json!({
        "submissions": records,
        "total": total,
        "page": page,
        "per_page": per_page,
        "total_pages": (total as f64 / per_page as f64).ceil() as i64,
    })
}

pub async fn create(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Json(req): Json<CreateSubmission>,
) -> Result<(StatusCode, Json<ChangeRecord>), AppError> {
    let section = Section::parse(&req.section)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown section tag: {}", req.section)))?;

    let record = review::create(
        &state.pool,
        req.organization_id,
        section,
        &req.previous_data,
        &req.proposed_data,
        review::Actor::from(&auth),
    )
    .await?;

    audit::log_event(
        &state.pool,
        Some(record.organization_id),
        Some(auth.admin_id),
        "submission.created",
        "submission",
        Some(record.id),
        Some(serde_json::json!({ "section": record.section })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Superadmin review queue across all organizations.
pub async fn list_queue(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_superadmin()?;

    let (status, section) = parse_filters(&query)?;
    let (page, per_page, offset) = paginate(&query);

    let params = db::change_records::ListParams {
        organization_id: query.organization_id,
        submitted_by: None,
        status,
        section,
        search: query.search.clone(),
        limit: per_page,
        offset,
    };

    let (records, total) = review::list(&state.pool, &params).await?;
    Ok(Json(list_envelope(records, total, page, per_page)))
}

/// One organization's submissions; admins only see their own organization.
pub async fn list_for_org(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(acronym): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let organization = db::organizations::find_by_acronym(&state.pool, &acronym)
        .await?
        .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;

    if !auth.can_access(organization.id) {
        return Err(AppError::Forbidden(
            "You can only view submissions for your own organization".to_string(),
        ));
    }

    let (status, section) = parse_filters(&query)?;
    let (page, per_page, offset) = paginate(&query);

    let params = db::change_records::ListParams {
        organization_id: Some(organization.id),
        submitted_by: None,
        status,
        section,
        search: query.search.clone(),
        limit: per_page,
        offset,
    };

    let (records, total) = review::list(&state.pool, &params).await?;
    Ok(Json(list_envelope(records, total, page, per_page)))
}

/// Single record plus its recomputed change set, ready for the review pane.
pub async fn get(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = db::change_records::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

    if !auth.can_access(record.organization_id) {
        return Err(AppError::Forbidden(
            "You can only view submissions for your own organization".to_string(),
        ));
    }

    let diff = review::record_diff(&record)?;

    Ok(Json(serde_json::json!({
        "submission": record,
        "diff": diff,
    })))
}

pub async fn update(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSubmission>,
) -> Result<Json<ChangeRecord>, AppError> {
    let record = review::update_pending(
        &state.pool,
        id,
        &req.proposed_data,
        review::Actor::from(&auth),
    )
    .await?;

    audit::log_event(
        &state.pool,
        Some(record.organization_id),
        Some(auth.admin_id),
        "submission.updated",
        "submission",
        Some(record.id),
        None,
    )
    .await;

    Ok(Json(record))
}

/// Approve or reject. The decision commits first; the submitter notification
/// is fired afterwards so its failure can never mask a committed review.
pub async fn update_status(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatus>,
) -> Result<Json<ChangeRecord>, AppError> {
    auth.require_superadmin()?;

    let actor = review::Actor::from(&auth);
    let (record, approved) = match ChangeStatus::parse(&req.status) {
        Some(ChangeStatus::Approved) => (review::approve(&state.pool, id, actor).await?, true),
        Some(ChangeStatus::Rejected) => (
            review::reject(&state.pool, id, req.note.as_deref(), actor).await?,
            false,
        ),
        _ => {
            return Err(AppError::BadRequest(
                "Status must be approved or rejected".to_string(),
            ));
        }
    };

    crate::notify::submission_reviewed(&state.pool, &record, approved).await;

    audit::log_event(
        &state.pool,
        Some(record.organization_id),
        Some(auth.admin_id),
        if approved {
            "submission.approved"
        } else {
            "submission.rejected"
        },
        "submission",
        Some(record.id),
        None,
    )
    .await;

    Ok(Json(record))
}

pub async fn cancel(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChangeRecord>, AppError> {
    let record = review::cancel(&state.pool, id, review::Actor::from(&auth)).await?;

    audit::log_event(
        &state.pool,
        Some(record.organization_id),
        Some(auth.admin_id),
        "submission.cancelled",
        "submission",
        Some(record.id),
        None,
    )
    .await;

    Ok(Json(record))
}

pub async fn delete(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    review::delete_one(&state.pool, id, review::Actor::from(&auth)).await?;

    audit::log_event(
        &state.pool,
        auth.organization_id,
        Some(auth.admin_id),
        "submission.deleted",
        "submission",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

pub async fn bulk_cancel(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Json(req): Json<BulkIds>,
) -> Result<Json<review::BulkOutcome>, AppError> {
    if req.ids.is_empty() {
        return Err(AppError::BadRequest("No ids provided".to_string()));
    }

    let outcome = review::bulk_cancel(&state.pool, &req.ids, review::Actor::from(&auth)).await?;

    audit::log_event(
        &state.pool,
        auth.organization_id,
        Some(auth.admin_id),
        "submissions.bulk_cancelled",
        "submission",
        None,
        Some(serde_json::json!({
            "cancelled": outcome.cancelled,
            "skipped": outcome.skipped,
        })),
    )
    .await;

    Ok(Json(outcome))
}

pub async fn bulk_delete(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Json(req): Json<BulkIds>,
) -> Result<Json<serde_json::Value>, AppError> {
    if req.ids.is_empty() {
        return Err(AppError::BadRequest("No ids provided".to_string()));
    }

    let deleted = review::bulk_delete(&state.pool, &req.ids, review::Actor::from(&auth)).await?;

    audit::log_event(
        &state.pool,
        auth.organization_id,
        Some(auth.admin_id),
        "submissions.bulk_deleted",
        "submission",
        None,
        Some(serde_json::json!({ "count": deleted })),
    )
    .await;

    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
