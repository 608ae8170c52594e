pub mod admin;
pub mod auth;
pub mod notifications;
pub mod organizations;
pub mod submissions;

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        // Superadmin management
        .route(
            "/api/v1/admin/organizations",
            get(admin::list_organizations).post(admin::create_organization),
        )
        .route(
            "/api/v1/admin/organizations/{id}",
            get(admin::get_organization).delete(admin::delete_organization),
        )
        .route(
            "/api/v1/admin/admins",
            get(admin::list_admins).post(admin::create_admin),
        )
        .route("/api/v1/admin/admins/{id}", delete(admin::delete_admin))
        .route("/api/v1/admin/audit", get(admin::list_audit))
        // Public organization directory
        .route("/api/v1/organizations", get(organizations::list))
        .route(
            "/api/v1/organizations/{acronym}",
            get(organizations::get_profile),
        )
        .route(
            "/api/v1/organizations/{acronym}/submissions",
            get(submissions::list_for_org),
        )
        // Submissions
        .route(
            "/api/v1/submissions",
            get(submissions::list_queue).post(submissions::create),
        )
        .route(
            "/api/v1/submissions/bulk-cancel",
            post(submissions::bulk_cancel),
        )
        .route(
            "/api/v1/submissions/bulk-delete",
            post(submissions::bulk_delete),
        )
        .route(
            "/api/v1/submissions/{id}",
            get(submissions::get)
                .put(submissions::update)
                .delete(submissions::delete),
        )
        .route(
            "/api/v1/submissions/{id}/status",
            put(submissions::update_status),
        )
        .route(
            "/api/v1/submissions/{id}/cancel",
            post(submissions::cancel),
        )
        // Notifications
        .route("/api/v1/notifications", get(notifications::list))
        .route(
            "/api/v1/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/api/v1/notifications/read-all",
            post(notifications::read_all),
        )
        .route(
            "/api/v1/notifications/{id}/read",
            put(notifications::mark_read),
        )
        .route(
            "/api/v1/notifications/{id}",
            delete(notifications::delete),
        )
}
