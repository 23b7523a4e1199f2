use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryStats {
    pub total_scores: i64,
    pub average_score: f64,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
    pub participants_count: i64,
    pub judges_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryWithStats {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub weight: i32,
    pub max_points: i32,
    pub is_active: bool,
    pub stats: CategoryStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub success: bool,
    pub categories: Vec<CategoryWithStats>,
}
