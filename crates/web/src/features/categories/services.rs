use sqlx::PgPool;
use storage::{
    dto::category::CategoryWithStats, error::Result, repository::category::CategoryRepository,
};

/// Active categories with read-time aggregates, heaviest weight first.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<CategoryWithStats>> {
    CategoryRepository::new(pool).list_with_stats().await
}
