use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthAdmin;
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Admin, AuditEvent, Organization};
use crate::notify;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateOrganization {
    pub acronym: String,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateAdmin {
    pub organization_id: Uuid,
    pub email: String,
    pub password: String,
    pub name: String,
}

fn validate_acronym(acronym: &str) -> Result<(), AppError> {
    let ok = (2..=12).contains(&acronym.len())
        && acronym
            .chars()
            .all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_lowercase());
    if ok {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Acronym must be 2-12 uppercase letters or digits".to_string(),
        ))
    }
}

pub async fn list_organizations(
    auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Organization>>, AppError> {
    auth.require_superadmin()?;
    let organizations = db::organizations::list(&state.pool).await?;
    Ok(Json(organizations))
}

pub async fn create_organization(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Json(req): Json<CreateOrganization>,
) -> Result<Json<Organization>, AppError> {
    auth.require_superadmin()?;

    validate_acronym(&req.acronym)?;
    if req.name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let organization = db::organizations::create(&state.pool, &req.acronym, &req.name, &req.email)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("An organization with this acronym already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    audit::log_event(
        &state.pool,
        Some(organization.id),
        Some(auth.admin_id),
        "organization.created",
        "organization",
        Some(organization.id),
        None,
    )
    .await;

    Ok(Json(organization))
}

pub async fn get_organization(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_superadmin()?;

    let organization = db::organizations::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;

    let admins = db::admins::list_by_organization(&state.pool, id).await?;

    Ok(Json(serde_json::json!({
        "organization": organization,
        "admins": admins,
    })))
}

pub async fn delete_organization(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_superadmin()?;

    db::organizations::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(id),
        Some(auth.admin_id),
        "organization.deleted",
        "organization",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

pub async fn list_admins(
    auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Admin>>, AppError> {
    auth.require_superadmin()?;
    let admins = db::admins::list_all(&state.pool).await?;
    Ok(Json(admins))
}

pub async fn create_admin(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Json(req): Json<CreateAdmin>,
) -> Result<Json<Admin>, AppError> {
    auth.require_superadmin()?;

    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let organization = db::organizations::find_by_id(&state.pool, req.organization_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let admin = db::admins::create(
        &state.pool,
        Some(organization.id),
        &req.email,
        &pw_hash,
        &req.name,
        false,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("An admin with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    // Welcome email + in-app greeting, both best effort
    if let Some(ref mailer) = state.system_mailer {
        let _ = mailer
            .send_welcome(
                &admin.email,
                &admin.name,
                &organization.name,
                &state.config.base_url,
            )
            .await;
    }
    notify::admin_welcome(&state.pool, admin.id, &organization.name).await;

    audit::log_event(
        &state.pool,
        Some(organization.id),
        Some(auth.admin_id),
        "admin.created",
        "admin",
        Some(admin.id),
        None,
    )
    .await;

    Ok(Json(admin))
}

pub async fn delete_admin(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_superadmin()?;

    if id == auth.admin_id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    db::admins::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        None,
        Some(auth.admin_id),
        "admin.deleted",
        "admin",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

#[derive(Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_audit(
    auth: AuthAdmin,
    State(state): State<SharedState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEvent>>, AppError> {
    auth.require_superadmin()?;

    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);

    let events = db::audit::list(&state.pool, limit, offset).await?;
    Ok(Json(events))
}
