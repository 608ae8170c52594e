use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Advocacy {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}
