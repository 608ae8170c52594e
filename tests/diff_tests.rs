//! Pure diff-engine tests: no database, no server. The same `diff()` gates
//! submission creation and renders the review summary, so these pin down the
//! comparison semantics both call sites share.

use serde_json::json;
use uuid::Uuid;

use orghub::models::Section;
use orghub::review::diff::{OrgHeadEntry, SectionDiff, SectionEdit};

fn head(id: Option<Uuid>, name: &str, position: &str) -> OrgHeadEntry {
    OrgHeadEntry {
        id,
        name: name.to_string(),
        position: position.to_string(),
        ..Default::default()
    }
}

// ── Text sections ───────────────────────────────────────────────

#[test]
fn identical_text_is_empty() {
    let edit = SectionEdit::Advocacy {
        previous: "We serve the community.".to_string(),
        proposed: "We serve the community.".to_string(),
    };
    assert!(edit.diff().is_empty());
}

#[test]
fn trailing_whitespace_is_not_a_change() {
    let edit = SectionEdit::Advocacy {
        previous: "Same text".to_string(),
        proposed: "  Same text \n".to_string(),
    };
    assert!(edit.diff().is_empty());
}

#[test]
fn changed_text_keeps_untrimmed_originals() {
    let edit = SectionEdit::Competency {
        previous: "Old text ".to_string(),
        proposed: "New text".to_string(),
    };
    let SectionDiff::Text(Some(change)) = edit.diff() else {
        panic!("expected a text change");
    };
    assert_eq!(change.previous, "Old text ");
    assert_eq!(change.next, "New text");
}

// ── Organization-info fields ────────────────────────────────────

#[test]
fn only_changed_fields_are_reported() {
    let edit = SectionEdit::from_parts(
        Section::Organization,
        &json!({ "name": "Circle", "email": "old@test.com" }),
        &json!({ "name": "Circle", "email": "new@test.com" }),
    )
    .unwrap();

    let SectionDiff::Fields(changes) = edit.diff() else {
        panic!("expected field changes");
    };
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].field, "email");
    assert_eq!(changes[0].previous, "old@test.com");
    assert_eq!(changes[0].next, "new@test.com");
}

#[test]
fn absent_previous_field_compares_as_empty() {
    let edit = SectionEdit::from_parts(
        Section::Organization,
        &json!({}),
        &json!({ "facebook": "fb.com/circle" }),
    )
    .unwrap();

    let SectionDiff::Fields(changes) = edit.diff() else {
        panic!("expected field changes");
    };
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].field, "facebook");
    assert_eq!(changes[0].previous, "");
}

#[test]
fn fields_absent_from_proposed_do_not_participate() {
    // The proposed payload carries no description, so a stale previous
    // description is not a change.
    let edit = SectionEdit::from_parts(
        Section::Organization,
        &json!({ "name": "Circle", "description": "older" }),
        &json!({ "name": "Circle" }),
    )
    .unwrap();
    assert!(edit.diff().is_empty());
}

// ── Head roster ─────────────────────────────────────────────────

#[test]
fn identical_roster_is_empty() {
    let id = Uuid::now_v7();
    let edit = SectionEdit::OrgHeads {
        previous: vec![head(Some(id), "Jane Cruz", "President")],
        proposed: vec![head(Some(id), "Jane Cruz", "President")],
    };
    assert!(edit.diff().is_empty());
}

#[test]
fn idless_proposed_entry_is_added() {
    let edit = SectionEdit::OrgHeads {
        previous: vec![],
        proposed: vec![head(None, "Jane Cruz", "President")],
    };
    let SectionDiff::Roster(roster) = edit.diff() else {
        panic!("expected a roster diff");
    };
    assert_eq!(roster.added.len(), 1);
    assert_eq!(roster.added[0].name, "Jane Cruz");
    assert!(roster.updated.is_empty());
    assert!(roster.removed.is_empty());
}

#[test]
fn unknown_id_counts_as_added() {
    // An id the previous snapshot never held cannot be an update; the apply
    // step would insert it, so the diff calls it added too.
    let edit = SectionEdit::OrgHeads {
        previous: vec![],
        proposed: vec![head(Some(Uuid::now_v7()), "Jane Cruz", "President")],
    };
    let SectionDiff::Roster(roster) = edit.diff() else {
        panic!("expected a roster diff");
    };
    assert_eq!(roster.added.len(), 1);
    assert!(roster.updated.is_empty());
}

#[test]
fn matched_id_reports_field_level_changes() {
    let id = Uuid::now_v7();
    let edit = SectionEdit::OrgHeads {
        previous: vec![head(Some(id), "Jane Cruz", "President")],
        proposed: vec![head(Some(id), "Jane Cruz", "Vice President")],
    };
    let SectionDiff::Roster(roster) = edit.diff() else {
        panic!("expected a roster diff");
    };
    assert_eq!(roster.updated.len(), 1);
    assert_eq!(roster.updated[0].id, id);
    assert_eq!(roster.updated[0].changes.len(), 1);
    assert_eq!(roster.updated[0].changes[0].field, "position");
    assert_eq!(roster.updated[0].changes[0].previous, "President");
    assert_eq!(roster.updated[0].changes[0].next, "Vice President");
}

#[test]
fn previous_only_entry_is_removed() {
    let keep = Uuid::now_v7();
    let gone = Uuid::now_v7();
    let edit = SectionEdit::OrgHeads {
        previous: vec![
            head(Some(keep), "Jane Cruz", "President"),
            head(Some(gone), "Ben Reyes", "Treasurer"),
        ],
        proposed: vec![head(Some(keep), "Jane Cruz", "President")],
    };
    let SectionDiff::Roster(roster) = edit.diff() else {
        panic!("expected a roster diff");
    };
    assert!(roster.added.is_empty());
    assert!(roster.updated.is_empty());
    assert_eq!(roster.removed.len(), 1);
    assert_eq!(roster.removed[0].id, Some(gone));
}

#[test]
fn reordered_roster_is_not_a_change() {
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    let edit = SectionEdit::OrgHeads {
        previous: vec![
            head(Some(a), "Jane Cruz", "President"),
            head(Some(b), "Ben Reyes", "Treasurer"),
        ],
        proposed: vec![
            head(Some(b), "Ben Reyes", "Treasurer"),
            head(Some(a), "Jane Cruz", "President"),
        ],
    };
    assert!(edit.diff().is_empty());
}

#[test]
fn mixed_roster_diff_covers_all_three_sets() {
    let updated = Uuid::now_v7();
    let removed = Uuid::now_v7();
    let edit = SectionEdit::OrgHeads {
        previous: vec![
            head(Some(updated), "Jane Cruz", "President"),
            head(Some(removed), "Ben Reyes", "Treasurer"),
        ],
        proposed: vec![
            head(Some(updated), "Jane Cruz", "Chairperson"),
            head(None, "Ana Lim", "Secretary"),
        ],
    };
    let SectionDiff::Roster(roster) = edit.diff() else {
        panic!("expected a roster diff");
    };
    assert_eq!(roster.added.len(), 1);
    assert_eq!(roster.updated.len(), 1);
    assert_eq!(roster.removed.len(), 1);
}

// ── Snapshot parsing ────────────────────────────────────────────

#[test]
fn text_section_rejects_non_string_snapshot() {
    let err = SectionEdit::from_parts(Section::Advocacy, &json!({ "text": "x" }), &json!("y"))
        .unwrap_err();
    assert!(err.contains("previous_data"));
    assert!(err.contains("must be a string"));
}

#[test]
fn organization_section_rejects_non_object_snapshot() {
    let err = SectionEdit::from_parts(Section::Organization, &json!({}), &json!("not an object"))
        .unwrap_err();
    assert!(err.contains("proposed_data"));
}

#[test]
fn roster_section_rejects_non_array_snapshot() {
    let err =
        SectionEdit::from_parts(Section::OrgHeads, &json!("not an array"), &json!([])).unwrap_err();
    assert!(err.contains("must be an array"));
}

#[test]
fn roster_entries_default_missing_fields() {
    // The editor may omit untouched fields; they parse as empty strings.
    let edit = SectionEdit::from_parts(
        Section::OrgHeads,
        &json!([]),
        &json!([{ "name": "Jane Cruz" }]),
    )
    .unwrap();
    let SectionDiff::Roster(roster) = edit.diff() else {
        panic!("expected a roster diff");
    };
    assert_eq!(roster.added[0].position, "");
    assert_eq!(roster.added[0].photo, "");
}

#[test]
fn section_tags_round_trip() {
    for tag in ["organization", "advocacy", "competency", "orgHeads"] {
        assert_eq!(Section::parse(tag).unwrap().as_str(), tag);
    }
    assert!(Section::parse("programs").is_none());
}
