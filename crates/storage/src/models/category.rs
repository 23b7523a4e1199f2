use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub weight: i32,
    pub max_points: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
