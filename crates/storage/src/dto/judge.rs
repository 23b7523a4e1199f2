use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_role_id() -> i32 {
    // "judge" reference row
    2
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateJudgeRequest {
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "Display name is required"))]
    pub display_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(default = "default_role_id")]
    pub role_id: i32,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct JudgeResponse {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateJudgeResponse {
    pub success: bool,
    pub message: String,
    pub judge: JudgeResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JudgeStats {
    pub scores_given: i64,
    pub participants_scored: i64,
    pub average_score: f64,
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JudgeWithStats {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub stats: JudgeStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JudgeListResponse {
    pub success: bool,
    pub judges: Vec<JudgeWithStats>,
}
