use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Read-time aggregates for one participant, recomputed from the scores
/// table on every request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantStats {
    pub total_scores: i64,
    pub average_score: f64,
    pub judges_count: i64,
    pub categories_count: i64,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
    pub last_scored: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantWithStats {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub registration: Option<String>,
    pub stats: ParticipantStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantListResponse {
    pub success: bool,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
    pub participants: Vec<ParticipantWithStats>,
}
