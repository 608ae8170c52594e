//! Applies an approved edit to the live profile tables.
//!
//! Always called inside the approval transaction, after the pending check and
//! row lock. A failed write here rolls the whole approval back, so the status
//! flip and the live data can never disagree.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::db;

use super::diff::{OrgHeadEntry, SectionEdit};

pub async fn apply_edit(
    conn: &mut PgConnection,
    organization_id: Uuid,
    edit: &SectionEdit,
) -> Result<(), sqlx::Error> {
    match edit {
        SectionEdit::Organization { proposed, .. } => {
            db::organizations::update_profile(&mut *conn, organization_id, proposed).await?;
        }
        SectionEdit::Advocacy { proposed, .. } => {
            db::advocacies::upsert(&mut *conn, organization_id, proposed).await?;
        }
        SectionEdit::Competency { proposed, .. } => {
            db::competencies::upsert(&mut *conn, organization_id, proposed).await?;
        }
        SectionEdit::OrgHeads { previous, proposed } => {
            reconcile_roster(conn, organization_id, previous, proposed).await?;
        }
    }
    Ok(())
}

/// Set-difference reconciliation using the same id alignment as the diff:
/// unknown ids insert, matched ids update, previous-only ids delete. An
/// update whose live row vanished since submission affects zero rows and is
/// left at that — last committed approval wins.
async fn reconcile_roster(
    conn: &mut PgConnection,
    organization_id: Uuid,
    previous: &[OrgHeadEntry],
    proposed: &[OrgHeadEntry],
) -> Result<(), sqlx::Error> {
    for entry in proposed {
        let known = entry
            .id
            .filter(|id| previous.iter().any(|p| p.id == Some(*id)));
        match known {
            Some(id) => {
                db::org_heads::update(
                    &mut *conn,
                    id,
                    organization_id,
                    &entry.name,
                    &entry.position,
                    &entry.email,
                    &entry.facebook,
                    &entry.photo,
                )
                .await?;
            }
            None => {
                db::org_heads::insert(
                    &mut *conn,
                    organization_id,
                    &entry.name,
                    &entry.position,
                    &entry.email,
                    &entry.facebook,
                    &entry.photo,
                )
                .await?;
            }
        }
    }

    let removed: Vec<Uuid> = previous
        .iter()
        .filter_map(|p| p.id)
        .filter(|id| !proposed.iter().any(|e| e.id == Some(*id)))
        .collect();
    if !removed.is_empty() {
        db::org_heads::delete_many(&mut *conn, organization_id, &removed).await?;
    }

    Ok(())
}
