use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Judge {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role_id: i32,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Identity attached to a validated bearer token. Always re-fetched from the
/// judges table so deactivation takes effect on the next request.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuthenticatedJudge {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub role: String,
}

impl AuthenticatedJudge {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
