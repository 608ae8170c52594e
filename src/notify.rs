//! In-app notification fan-out.
//!
//! Notifications are courtesy side effects of other components. Review
//! notifications run after the review transaction has committed, so a
//! failure here is logged and swallowed instead of masking an already
//! successful decision.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::{ChangeRecord, Section};

/// Tells the submitter the outcome of a review.
pub async fn submission_reviewed(pool: &PgPool, record: &ChangeRecord, approved: bool) {
    let label = Section::parse(&record.section)
        .map(|s| s.label())
        .unwrap_or("Profile");

    let (kind, title, message) = if approved {
        (
            "approval",
            format!("{label} Update Approved"),
            format!("Your {label} update has been approved and is now live."),
        )
    } else {
        let message = match record.review_note.as_deref() {
            Some(note) if !note.is_empty() => {
                format!("Your {label} update was rejected: {note}")
            }
            _ => format!("Your {label} update was rejected."),
        };
        ("decline", format!("{label} Update Rejected"), message)
    };

    if let Err(err) = db::notifications::create(
        pool,
        record.submitted_by,
        kind,
        &title,
        &message,
        Some("submissions"),
        Some(record.id),
    )
    .await
    {
        tracing::error!(
            "failed to create review notification for submission {}: {err}",
            record.id
        );
    }
}

/// Greets a newly provisioned admin in-app. The welcome email is a separate
/// best-effort step in the admin routes.
pub async fn admin_welcome(pool: &PgPool, admin_id: Uuid, organization_name: &str) {
    let message = format!(
        "Your admin account for {organization_name} is ready. \
         You can now manage the organization's profile and submit changes for review."
    );
    if let Err(err) = db::notifications::create(
        pool,
        admin_id,
        "message",
        "Welcome to OrgHub",
        &message,
        None,
        None,
    )
    .await
    {
        tracing::error!("failed to create welcome notification for admin {admin_id}: {err}");
    }
}
