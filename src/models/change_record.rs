use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The profile sub-area a submission edits. Stored as text in
/// `change_records.section`; the serde tags are the wire values the
/// portal frontend sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "organization")]
    Organization,
    #[serde(rename = "advocacy")]
    Advocacy,
    #[serde(rename = "competency")]
    Competency,
    #[serde(rename = "orgHeads")]
    OrgHeads,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Organization => "organization",
            Section::Advocacy => "advocacy",
            Section::Competency => "competency",
            Section::OrgHeads => "orgHeads",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "organization" => Some(Section::Organization),
            "advocacy" => Some(Section::Advocacy),
            "competency" => Some(Section::Competency),
            "orgHeads" => Some(Section::OrgHeads),
            _ => None,
        }
    }

    /// Human-readable name used in notification titles.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Organization => "Organization Information",
            Section::Advocacy => "Advocacy",
            Section::Competency => "Competency",
            Section::OrgHeads => "Organization Heads",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Pending => "pending",
            ChangeStatus::Approved => "approved",
            ChangeStatus::Rejected => "rejected",
            ChangeStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ChangeStatus::Pending),
            "approved" => Some(ChangeStatus::Approved),
            "rejected" => Some(ChangeStatus::Rejected),
            "cancelled" => Some(ChangeStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self != ChangeStatus::Pending
    }
}

/// A proposed profile edit awaiting superadmin review. `previous_data`
/// and `proposed_data` hold section-shaped JSON snapshots captured at
/// submission time.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub section: String,
    pub previous_data: serde_json::Value,
    pub proposed_data: serde_json::Value,
    pub status: String,
    pub submitted_by: Uuid,
    pub submitted_by_name: String,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_note: Option<String>,
}
