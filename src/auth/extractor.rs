use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::AppError;
use crate::state::SharedState;

/// The acting portal account, resolved from a Bearer token or the
/// `access_token` cookie. Workflow code never reads this directly;
/// handlers pass the identity fields in explicitly.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub admin_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub is_superadmin: bool,
}

impl AuthAdmin {
    pub fn require_superadmin(&self) -> Result<(), AppError> {
        if self.is_superadmin {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Superadmin access required".to_string(),
            ))
        }
    }

    /// The organization this admin manages. Superadmin accounts carry no
    /// organization and are rejected here.
    pub fn organization(&self) -> Result<Uuid, AppError> {
        self.organization_id.ok_or_else(|| {
            AppError::Forbidden("This action requires an organization admin account".to_string())
        })
    }

    /// True when the caller may read data belonging to `organization_id`.
    pub fn can_access(&self, organization_id: Uuid) -> bool {
        self.is_superadmin || self.organization_id == Some(organization_id)
    }
}

impl FromRequestParts<SharedState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Try Bearer token from Authorization header first
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                let claims = jwt::decode_token(token, &state.config.jwt_secret)
                    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

                return Ok(AuthAdmin {
                    admin_id: claims.sub,
                    organization_id: claims.org,
                    is_superadmin: claims.sup,
                });
            }
        }

        // Try cookie-based auth
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get("access_token") {
            let claims = jwt::decode_token(cookie.value(), &state.config.jwt_secret)
                .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

            return Ok(AuthAdmin {
                admin_id: claims.sub,
                organization_id: claims.org,
                is_superadmin: claims.sup,
            });
        }

        Err(AppError::Unauthorized(
            "Missing authentication token".to_string(),
        ))
    }
}
