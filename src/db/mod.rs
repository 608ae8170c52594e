pub mod admins;
pub mod advocacies;
pub mod audit;
pub mod change_records;
pub mod competencies;
pub mod notifications;
pub mod org_heads;
pub mod organizations;
pub mod refresh_tokens;
