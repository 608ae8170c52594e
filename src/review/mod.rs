//! Submission lifecycle: `pending` → `approved` | `rejected` | `cancelled`.
//!
//! Every transition out of `pending` runs in its own transaction with the
//! record row locked (`SELECT … FOR UPDATE`), then re-checks the status under
//! the lock. Two concurrent reviews of the same record therefore serialize:
//! the second observes the terminal state and gets a conflict instead of a
//! double application. Workflow functions take the acting identity as an
//! explicit [`Actor`] rather than reading ambient request state, so the whole
//! state machine is exercisable without HTTP.

pub mod apply;
pub mod diff;

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extractor::AuthAdmin;
use crate::db;
use crate::db::change_records::ListParams;
use crate::error::AppError;
use crate::models::{ChangeRecord, ChangeStatus, Section};

use diff::{SectionDiff, SectionEdit};

/// The authenticated admin an operation runs as.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub admin_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub is_superadmin: bool,
}

impl Actor {
    fn can_access(&self, organization_id: Uuid) -> bool {
        self.is_superadmin || self.organization_id == Some(organization_id)
    }
}

impl From<&AuthAdmin> for Actor {
    fn from(auth: &AuthAdmin) -> Self {
        Actor {
            admin_id: auth.admin_id,
            organization_id: auth.organization_id,
            is_superadmin: auth.is_superadmin,
        }
    }
}

#[derive(Debug)]
pub enum ReviewError {
    /// Previous and proposed snapshots are equivalent.
    NoChanges,
    /// Snapshot JSON does not match the section's shape.
    InvalidPayload(String),
    NotFound(&'static str),
    /// Transition attempted on a record already in the named terminal state.
    NotPending(String),
    Forbidden(&'static str),
    Database(sqlx::Error),
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewError::NoChanges => write!(f, "No changes detected"),
            ReviewError::InvalidPayload(msg) => write!(f, "{msg}"),
            ReviewError::NotFound(what) => write!(f, "{what}"),
            ReviewError::NotPending(status) => write!(f, "Submission is already {status}"),
            ReviewError::Forbidden(msg) => write!(f, "{msg}"),
            ReviewError::Database(err) => write!(f, "database error: {err}"),
        }
    }
}

impl From<sqlx::Error> for ReviewError {
    fn from(err: sqlx::Error) -> Self {
        ReviewError::Database(err)
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NoChanges => AppError::BadRequest("No changes detected".to_string()),
            ReviewError::InvalidPayload(msg) => AppError::BadRequest(msg),
            ReviewError::NotFound(what) => AppError::NotFound(what.to_string()),
            ReviewError::NotPending(status) => {
                AppError::Conflict(format!("Submission is already {status}"))
            }
            ReviewError::Forbidden(msg) => AppError::Forbidden(msg.to_string()),
            ReviewError::Database(e) => AppError::Database(e),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct BulkOutcome {
    pub cancelled: u64,
    pub skipped: u64,
}

fn ensure_pending(record: &ChangeRecord) -> Result<(), ReviewError> {
    if record.status == ChangeStatus::Pending.as_str() {
        Ok(())
    } else {
        Err(ReviewError::NotPending(record.status.clone()))
    }
}

fn parse_edit(
    section: &str,
    previous: &serde_json::Value,
    proposed: &serde_json::Value,
) -> Result<SectionEdit, ReviewError> {
    let section = Section::parse(section)
        .ok_or_else(|| ReviewError::InvalidPayload(format!("unknown section tag: {section}")))?;
    SectionEdit::from_parts(section, previous, proposed).map_err(ReviewError::InvalidPayload)
}

/// The human-readable change set for a stored record, recomputed from its
/// snapshots with the same semantics that gated its creation.
pub fn record_diff(record: &ChangeRecord) -> Result<SectionDiff, ReviewError> {
    let edit = parse_edit(&record.section, &record.previous_data, &record.proposed_data)?;
    Ok(edit.diff())
}

/// Creates a pending submission. Rejects no-op diffs before touching the
/// table, so an empty change set is never persisted.
pub async fn create(
    pool: &PgPool,
    organization_id: Uuid,
    section: Section,
    previous: &serde_json::Value,
    proposed: &serde_json::Value,
    actor: Actor,
) -> Result<ChangeRecord, ReviewError> {
    if !actor.can_access(organization_id) {
        return Err(ReviewError::Forbidden(
            "You can only submit changes for your own organization",
        ));
    }

    let edit = SectionEdit::from_parts(section, previous, proposed)
        .map_err(ReviewError::InvalidPayload)?;
    if edit.diff().is_empty() {
        return Err(ReviewError::NoChanges);
    }

    db::organizations::find_by_id(pool, organization_id)
        .await?
        .ok_or(ReviewError::NotFound("Organization not found"))?;
    let submitter = db::admins::find_by_id(pool, actor.admin_id)
        .await?
        .ok_or(ReviewError::NotFound("Admin not found"))?;

    let record = db::change_records::create(
        pool,
        organization_id,
        section.as_str(),
        previous,
        proposed,
        actor.admin_id,
        &submitter.name,
    )
    .await?;
    Ok(record)
}

pub async fn list(
    pool: &PgPool,
    params: &ListParams,
) -> Result<(Vec<ChangeRecord>, i64), ReviewError> {
    let records = db::change_records::list(pool, params).await?;
    let total = db::change_records::count(pool, params).await?;
    Ok((records, total))
}

/// Replaces the proposed payload of a still-pending submission. Submitter
/// only; the new payload must still differ from the stored previous snapshot.
pub async fn update_pending(
    pool: &PgPool,
    id: Uuid,
    proposed: &serde_json::Value,
    actor: Actor,
) -> Result<ChangeRecord, ReviewError> {
    let mut tx = pool.begin().await?;

    let record = db::change_records::lock_for_review(&mut *tx, id)
        .await?
        .ok_or(ReviewError::NotFound("Submission not found"))?;
    if record.submitted_by != actor.admin_id {
        return Err(ReviewError::Forbidden(
            "Only the submitter can edit a submission",
        ));
    }
    ensure_pending(&record)?;

    let edit = parse_edit(&record.section, &record.previous_data, proposed)?;
    if edit.diff().is_empty() {
        return Err(ReviewError::NoChanges);
    }

    let updated = db::change_records::update_proposed(&mut *tx, id, proposed).await?;
    tx.commit().await?;
    Ok(updated)
}

/// Submitter-initiated cancel; pending only. Re-cancelling a terminal record
/// is a conflict, never a silent success.
pub async fn cancel(pool: &PgPool, id: Uuid, actor: Actor) -> Result<ChangeRecord, ReviewError> {
    let mut tx = pool.begin().await?;

    let record = db::change_records::lock_for_review(&mut *tx, id)
        .await?
        .ok_or(ReviewError::NotFound("Submission not found"))?;
    if record.submitted_by != actor.admin_id {
        return Err(ReviewError::Forbidden(
            "Only the submitter can cancel a submission",
        ));
    }
    ensure_pending(&record)?;

    let cancelled = db::change_records::mark_cancelled(&mut *tx, id).await?;
    tx.commit().await?;
    Ok(cancelled)
}

/// Approves a pending record: applies the proposed snapshot to the live
/// tables and flips the status in one transaction. A failed live-table write
/// rolls everything back; the record stays pending.
pub async fn approve(
    pool: &PgPool,
    id: Uuid,
    reviewer: Actor,
) -> Result<ChangeRecord, ReviewError> {
    if !reviewer.is_superadmin {
        return Err(ReviewError::Forbidden("Superadmin access required"));
    }

    let mut tx = pool.begin().await?;

    let record = db::change_records::lock_for_review(&mut *tx, id)
        .await?
        .ok_or(ReviewError::NotFound("Submission not found"))?;
    ensure_pending(&record)?;

    let edit = parse_edit(&record.section, &record.previous_data, &record.proposed_data)?;
    apply::apply_edit(&mut tx, record.organization_id, &edit).await?;

    let approved = db::change_records::mark_reviewed(
        &mut *tx,
        id,
        ChangeStatus::Approved.as_str(),
        reviewer.admin_id,
        None,
    )
    .await?;
    tx.commit().await?;
    Ok(approved)
}

/// Rejects a pending record with an optional reviewer note. Touches only the
/// record row; the live tables keep their current data.
pub async fn reject(
    pool: &PgPool,
    id: Uuid,
    note: Option<&str>,
    reviewer: Actor,
) -> Result<ChangeRecord, ReviewError> {
    if !reviewer.is_superadmin {
        return Err(ReviewError::Forbidden("Superadmin access required"));
    }

    let mut tx = pool.begin().await?;

    let record = db::change_records::lock_for_review(&mut *tx, id)
        .await?
        .ok_or(ReviewError::NotFound("Submission not found"))?;
    ensure_pending(&record)?;

    let rejected = db::change_records::mark_reviewed(
        &mut *tx,
        id,
        ChangeStatus::Rejected.as_str(),
        reviewer.admin_id,
        note,
    )
    .await?;
    tx.commit().await?;
    Ok(rejected)
}

/// Cancels the pending subset of the actor's own submissions and counts the
/// rest as skipped. Non-pending ids in the batch are not an error. Counts
/// describe distinct records, so repeated ids in the batch collapse first.
pub async fn bulk_cancel(
    pool: &PgPool,
    ids: &[Uuid],
    actor: Actor,
) -> Result<BulkOutcome, ReviewError> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    let cancelled = db::change_records::bulk_cancel(pool, &ids, actor.admin_id).await?;
    Ok(BulkOutcome {
        cancelled,
        skipped: ids.len() as u64 - cancelled,
    })
}

/// Permanent removal regardless of status, scoped to the actor's
/// organization; the superadmin deletes across organizations.
pub async fn bulk_delete(pool: &PgPool, ids: &[Uuid], actor: Actor) -> Result<u64, ReviewError> {
    let scope = if actor.is_superadmin {
        None
    } else {
        match actor.organization_id {
            Some(org) => Some(org),
            None => return Err(ReviewError::Forbidden("No organization scope")),
        }
    };
    let deleted = db::change_records::bulk_delete(pool, ids, scope).await?;
    Ok(deleted)
}

pub async fn delete_one(pool: &PgPool, id: Uuid, actor: Actor) -> Result<(), ReviewError> {
    let record = db::change_records::find_by_id(pool, id)
        .await?
        .ok_or(ReviewError::NotFound("Submission not found"))?;
    if !actor.can_access(record.organization_id) {
        return Err(ReviewError::Forbidden(
            "You can only delete submissions for your own organization",
        ));
    }
    let deleted = db::change_records::delete(pool, id).await?;
    if deleted == 0 {
        return Err(ReviewError::NotFound("Submission not found"));
    }
    Ok(())
}
