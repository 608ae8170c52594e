//! Pure comparison logic for proposed profile edits.
//!
//! Every section stores a `previous` and a `proposed` snapshot whose JSON
//! shape depends on the section tag: free text for advocacy/competency, a
//! partial field map for organization info, and an array of head entries for
//! the roster. `SectionEdit` pairs the tag with both parsed snapshots so each
//! shape gets its own diff strategy, and `diff()` stays a pure function —
//! the same routine gates submission creation and renders the review summary,
//! so a record can never be submittable in one place and a no-op in the other.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Section;

/// Partial organization-info payload. Absent fields are left untouched on
/// approval; for diffing, an absent previous value compares as empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrgInfoFields {
    pub logo: Option<String>,
    pub acronym: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub facebook: Option<String>,
    pub description: Option<String>,
}

impl OrgInfoFields {
    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "logo" => self.logo.as_deref(),
            "acronym" => self.acronym.as_deref(),
            "name" => self.name.as_deref(),
            "email" => self.email.as_deref(),
            "facebook" => self.facebook.as_deref(),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

const ORG_INFO_FIELDS: [&str; 6] = ["logo", "acronym", "name", "email", "facebook", "description"];

/// One entry of the head roster. `id` is absent for entries the admin added
/// in the editor; present ids refer to live `org_heads` rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrgHeadEntry {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub photo: String,
}

impl OrgHeadEntry {
    fn get(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "position" => &self.position,
            "email" => &self.email,
            "facebook" => &self.facebook,
            "photo" => &self.photo,
            _ => "",
        }
    }
}

const HEAD_FIELDS: [&str; 5] = ["name", "position", "email", "facebook", "photo"];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextChange {
    pub previous: String,
    pub next: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub previous: String,
    pub next: String,
}

/// Per-field changes for one roster entry that exists on both sides.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RosterItemDiff {
    pub id: Uuid,
    pub name: String,
    pub changes: Vec<FieldChange>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RosterDiff {
    pub added: Vec<OrgHeadEntry>,
    pub updated: Vec<RosterItemDiff>,
    pub removed: Vec<OrgHeadEntry>,
}

impl RosterDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "changes", rename_all = "lowercase")]
pub enum SectionDiff {
    /// Advocacy/competency body; `None` when the trimmed texts match.
    Text(Option<TextChange>),
    /// Organization-info fields that actually differ.
    Fields(Vec<FieldChange>),
    /// Head-roster reconciliation sets.
    Roster(RosterDiff),
}

impl SectionDiff {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionDiff::Text(change) => change.is_none(),
            SectionDiff::Fields(changes) => changes.is_empty(),
            SectionDiff::Roster(roster) => roster.is_empty(),
        }
    }
}

/// A section tag paired with both parsed snapshots. Parsing happens once, at
/// the submission boundary; everything downstream works with typed data.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionEdit {
    Organization {
        previous: OrgInfoFields,
        proposed: OrgInfoFields,
    },
    Advocacy {
        previous: String,
        proposed: String,
    },
    Competency {
        previous: String,
        proposed: String,
    },
    OrgHeads {
        previous: Vec<OrgHeadEntry>,
        proposed: Vec<OrgHeadEntry>,
    },
}

impl SectionEdit {
    /// Parses raw snapshots according to the section tag. The error string
    /// names the expected shape and is safe to surface to the caller.
    pub fn from_parts(
        section: Section,
        previous: &serde_json::Value,
        proposed: &serde_json::Value,
    ) -> Result<Self, String> {
        match section {
            Section::Organization => {
                let previous = parse_fields(previous, "previous_data")?;
                let proposed = parse_fields(proposed, "proposed_data")?;
                Ok(SectionEdit::Organization { previous, proposed })
            }
            Section::Advocacy => Ok(SectionEdit::Advocacy {
                previous: parse_text(previous, "previous_data")?,
                proposed: parse_text(proposed, "proposed_data")?,
            }),
            Section::Competency => Ok(SectionEdit::Competency {
                previous: parse_text(previous, "previous_data")?,
                proposed: parse_text(proposed, "proposed_data")?,
            }),
            Section::OrgHeads => {
                let previous = parse_roster(previous, "previous_data")?;
                let proposed = parse_roster(proposed, "proposed_data")?;
                Ok(SectionEdit::OrgHeads { previous, proposed })
            }
        }
    }

    pub fn section(&self) -> Section {
        match self {
            SectionEdit::Organization { .. } => Section::Organization,
            SectionEdit::Advocacy { .. } => Section::Advocacy,
            SectionEdit::Competency { .. } => Section::Competency,
            SectionEdit::OrgHeads { .. } => Section::OrgHeads,
        }
    }

    /// Computes the change set. Pure: no side effects, no allocation beyond
    /// the returned diff.
    pub fn diff(&self) -> SectionDiff {
        match self {
            SectionEdit::Organization { previous, proposed } => {
                SectionDiff::Fields(diff_fields(previous, proposed))
            }
            SectionEdit::Advocacy { previous, proposed }
            | SectionEdit::Competency { previous, proposed } => {
                SectionDiff::Text(diff_text(previous, proposed))
            }
            SectionEdit::OrgHeads { previous, proposed } => {
                SectionDiff::Roster(diff_roster(previous, proposed))
            }
        }
    }
}

fn parse_text(value: &serde_json::Value, what: &str) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| format!("{what} must be a string for this section"))
}

fn parse_fields(value: &serde_json::Value, what: &str) -> Result<OrgInfoFields, String> {
    if !value.is_object() {
        return Err(format!("{what} must be an object for this section"));
    }
    serde_json::from_value(value.clone()).map_err(|e| format!("{what} is malformed: {e}"))
}

fn parse_roster(value: &serde_json::Value, what: &str) -> Result<Vec<OrgHeadEntry>, String> {
    if !value.is_array() {
        return Err(format!("{what} must be an array for this section"));
    }
    serde_json::from_value(value.clone()).map_err(|e| format!("{what} is malformed: {e}"))
}

/// Texts compare trimmed so trailing-whitespace edits do not produce
/// phantom submissions. The emitted pair keeps the originals.
fn diff_text(previous: &str, proposed: &str) -> Option<TextChange> {
    if previous.trim() == proposed.trim() {
        None
    } else {
        Some(TextChange {
            previous: previous.to_owned(),
            next: proposed.to_owned(),
        })
    }
}

/// Only fields carried by the proposed payload participate; an absent
/// previous value compares as empty string.
fn diff_fields(previous: &OrgInfoFields, proposed: &OrgInfoFields) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    for field in ORG_INFO_FIELDS {
        let Some(next) = proposed.get(field) else {
            continue;
        };
        let prev = previous.get(field).unwrap_or("");
        if prev != next {
            changes.push(FieldChange {
                field: field.to_owned(),
                previous: prev.to_owned(),
                next: next.to_owned(),
            });
        }
    }
    changes
}

/// Aligns entries by `id`: proposed entries without a known id are additions,
/// matched ids yield per-field diffs, previous ids missing from the proposed
/// roster are removals. Order within the roster carries no meaning.
fn diff_roster(previous: &[OrgHeadEntry], proposed: &[OrgHeadEntry]) -> RosterDiff {
    let mut diff = RosterDiff::default();

    for entry in proposed {
        let known = entry
            .id
            .and_then(|id| previous.iter().find(|p| p.id == Some(id)).map(|p| (id, p)));
        match known {
            None => diff.added.push(entry.clone()),
            Some((id, prev)) => {
                let changes = diff_head_fields(prev, entry);
                if !changes.is_empty() {
                    diff.updated.push(RosterItemDiff {
                        id,
                        name: entry.name.clone(),
                        changes,
                    });
                }
            }
        }
    }

    for prev in previous {
        let retained = prev
            .id
            .is_some_and(|id| proposed.iter().any(|p| p.id == Some(id)));
        if !retained {
            diff.removed.push(prev.clone());
        }
    }

    diff
}

fn diff_head_fields(previous: &OrgHeadEntry, proposed: &OrgHeadEntry) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    for field in HEAD_FIELDS {
        let prev = previous.get(field);
        let next = proposed.get(field);
        if prev != next {
            changes.push(FieldChange {
                field: field.to_owned(),
                previous: prev.to_owned(),
                next: next.to_owned(),
            });
        }
    }
    changes
}
