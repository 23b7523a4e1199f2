mod audit;
mod category;
mod judge;
mod participant;
mod role;
mod score;

pub use audit::{AuditAction, AuditEntry};
pub use category::Category;
pub use judge::{AuthenticatedJudge, Judge};
pub use participant::Participant;
pub use role::Role;
pub use score::Score;
