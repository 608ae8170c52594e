pub mod admin;
pub mod advocacy;
pub mod audit_event;
pub mod change_record;
pub mod competency;
pub mod notification;
pub mod org_head;
pub mod organization;
pub mod refresh_token;

pub use admin::Admin;
pub use advocacy::Advocacy;
pub use audit_event::AuditEvent;
pub use change_record::{ChangeRecord, ChangeStatus, Section};
pub use competency::Competency;
pub use notification::Notification;
pub use org_head::OrgHead;
pub use organization::Organization;
pub use refresh_token::RefreshToken;
