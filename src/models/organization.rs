use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub acronym: String,
    pub name: String,
    pub email: String,
    pub facebook: String,
    pub description: String,
    pub logo: String,
    pub created_at: DateTime<Utc>,
}
