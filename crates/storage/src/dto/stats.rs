use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct OverviewStats {
    pub active_participants: i64,
    pub active_judges: i64,
    pub active_categories: i64,
    pub total_scores: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryBreakdown {
    pub name: String,
    pub weight: i32,
    pub total_scores: i64,
    pub average_score: f64,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JudgeActivity {
    pub display_name: String,
    pub scores_given: i64,
    pub participants_scored: i64,
    pub average_score: f64,
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopParticipant {
    pub name: String,
    pub total_scores: i64,
    pub average_score: f64,
    pub judges_scored: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub scores_count: i64,
    pub average_score: f64,
    pub unique_judges: i64,
    pub unique_participants: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsPayload {
    pub overview: OverviewStats,
    pub categories: Vec<CategoryBreakdown>,
    pub judge_activity: Vec<JudgeActivity>,
    pub top_participants: Vec<TopParticipant>,
    pub recent_activity: Vec<DailyActivity>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub stats: StatsPayload,
}
