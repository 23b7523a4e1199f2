use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One row per (judge, participant, category) triple, enforced by a unique
/// constraint. Resubmissions overwrite points and comments in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Score {
    pub id: i32,
    pub judge_id: i32,
    pub participant_id: i32,
    pub category_id: i32,
    pub points: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
