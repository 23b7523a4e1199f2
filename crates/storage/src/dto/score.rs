use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{PaginationMeta, PaginationParams, default_limit, default_page};
use super::participant::ParticipantWithStats;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitScoreRequest {
    #[validate(range(min = 1, message = "Valid participant ID is required"))]
    pub participant_id: i32,
    #[validate(range(min = 1, message = "Valid category ID is required"))]
    pub category_id: i32,
    #[validate(range(min = 1, max = 100, message = "Points must be between 1 and 100"))]
    pub points: i32,
    pub comments: Option<String>,
}

/// The score as stored, plus the weighted view used for cross-category
/// comparison. Weight is applied at read time, never written back.
#[derive(Debug, Serialize, ToSchema)]
pub struct AcceptedScore {
    pub points: i32,
    pub weighted_points: i32,
    pub category: String,
    pub comments: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    pub success: bool,
    pub message: String,
    pub score: AcceptedScore,
    pub participant: ParticipantWithStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JudgeRef {
    pub name: String,
    pub username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantRef {
    pub name: String,
    pub registration: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryRef {
    pub name: String,
    pub weight: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreDetail {
    pub points: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentScoreEntry {
    pub id: i32,
    pub judge: JudgeRef,
    pub participant: ParticipantRef,
    pub category: CategoryRef,
    pub score: ScoreDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentScoresResponse {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub pagination: PaginationMeta,
    pub scores: Vec<RecentScoreEntry>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct JudgeScoresFilter {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl JudgeScoresFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JudgeScoreEntry {
    pub id: i32,
    pub points: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub participant_name: String,
    pub category_name: Option<String>,
    pub participant_average: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JudgeScoreSummary {
    pub participants_scored: i64,
    pub total_scores: i64,
    pub average_score: f64,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JudgeScoresResponse {
    pub success: bool,
    pub pagination: PaginationMeta,
    pub summary: JudgeScoreSummary,
    pub scores: Vec<JudgeScoreEntry>,
}
