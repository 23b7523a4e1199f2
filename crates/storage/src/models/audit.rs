use serde_json::Value;

/// Mutation kind recorded in the audit trail. The upsert reports its branch
/// explicitly rather than inferring it from generated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Insert,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

/// Append-only audit record. Written inside the same transaction as the
/// mutation it describes, never read back by this service.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub table_name: &'static str,
    pub record_id: i32,
    pub action: AuditAction,
    pub actor_id: Option<i32>,
    pub changes: Value,
}
