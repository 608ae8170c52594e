use axum::Json;
use axum::extract::{Path, State};

use crate::db;
use crate::error::AppError;
use crate::models::Organization;
use crate::state::SharedState;

/// Public directory listing, no auth.
pub async fn list(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Organization>>, AppError> {
    let organizations = db::organizations::list(&state.pool).await?;
    Ok(Json(organizations))
}

/// Public profile: the live tables joined into one payload, exactly what an
/// approved submission's data looks like to visitors.
pub async fn get_profile(
    State(state): State<SharedState>,
    Path(acronym): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let organization = db::organizations::find_by_acronym(&state.pool, &acronym)
        .await?
        .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;

    let advocacy = db::advocacies::find_by_org(&state.pool, organization.id).await?;
    let competency = db::competencies::find_by_org(&state.pool, organization.id).await?;
    let org_heads = db::org_heads::list_by_org(&state.pool, organization.id).await?;

    Ok(Json(serde_json::json!({
        "organization": organization,
        "advocacy": advocacy,
        "competency": competency,
        "org_heads": org_heads,
    })))
}
