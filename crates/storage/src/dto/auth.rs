use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Scoring activity echoed back with the authenticated user on login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JudgeActivitySummary {
    pub participants_scored: i64,
    pub total_scores: i64,
    pub last_score_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<JudgeActivitySummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateResponse {
    pub success: bool,
    pub valid: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Profile {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub total_scores: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: Profile,
}

/// Partial profile update. Password changes require the current password.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Display name must not be empty"))]
    pub display_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub current_password: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.email.is_none() && self.new_password.is_none()
    }
}
