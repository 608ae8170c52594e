use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct OrgHead {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub position: String,
    pub email: String,
    pub facebook: String,
    pub photo: String,
    pub created_at: DateTime<Utc>,
}
