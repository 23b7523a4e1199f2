use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One scored category for a participant, with the weighted view alongside
/// the raw points.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryScore {
    pub category_id: i32,
    pub category_name: String,
    pub points: i32,
    pub weighted_points: i32,
}

/// One scoreboard row. Rank is dense over the rounded average score:
/// participants with identical averages share a rank and the next distinct
/// average takes the immediately following integer.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreboardEntry {
    pub rank: i64,
    pub id: i32,
    pub name: String,
    pub registration: Option<String>,
    pub total_scores: i64,
    pub average_score: f64,
    pub judges_count: i64,
    pub category_scores: Vec<CategoryScore>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreboardResponse {
    pub success: bool,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
    pub scoreboard: Vec<ScoreboardEntry>,
}
