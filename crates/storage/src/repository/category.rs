use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::dto::category::{CategoryStats, CategoryWithStats};
use crate::error::Result;
use crate::models::Category;
use crate::repository::decimal_to_f64;

#[derive(FromRow)]
struct CategoryStatsRow {
    id: i32,
    name: String,
    description: Option<String>,
    weight: i32,
    max_points: i32,
    is_active: bool,
    total_scores: i64,
    average_score: Decimal,
    min_score: Option<i32>,
    max_score: Option<i32>,
    participants_count: i64,
    judges_count: i64,
}

pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_active(&self, category_id: i32) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE id = $1 AND is_active = TRUE",
        )
        .bind(category_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Active categories with read-time aggregates, heaviest weight first.
    pub async fn list_with_stats(&self) -> Result<Vec<CategoryWithStats>> {
        let rows = sqlx::query_as::<_, CategoryStatsRow>(
            r#"
            SELECT
                c.id,
                c.name,
                c.description,
                c.weight,
                c.max_points,
                c.is_active,
                COUNT(s.id) AS total_scores,
                ROUND(COALESCE(AVG(s.points), 0), 2) AS average_score,
                MIN(s.points) AS min_score,
                MAX(s.points) AS max_score,
                COUNT(DISTINCT s.participant_id) AS participants_count,
                COUNT(DISTINCT s.judge_id) AS judges_count
            FROM categories c
            LEFT JOIN scores s ON c.id = s.category_id
            WHERE c.is_active = TRUE
            GROUP BY c.id
            ORDER BY c.weight DESC, c.name ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let categories = rows
            .into_iter()
            .map(|row| CategoryWithStats {
                id: row.id,
                name: row.name,
                description: row.description,
                weight: row.weight,
                max_points: row.max_points,
                is_active: row.is_active,
                stats: CategoryStats {
                    total_scores: row.total_scores,
                    average_score: decimal_to_f64(row.average_score),
                    min_score: row.min_score,
                    max_score: row.max_score,
                    participants_count: row.participants_count,
                    judges_count: row.judges_count,
                },
            })
            .collect();

        Ok(categories)
    }
}
