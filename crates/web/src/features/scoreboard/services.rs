use sqlx::PgPool;
use storage::{
    dto::scoreboard::ScoreboardEntry, error::Result, repository::scoreboard::ScoreboardRepository,
};

/// Ranked standings with per-category averages. Ties share a rank and
/// the next distinct average takes the following rank.
pub async fn scoreboard(pool: &PgPool) -> Result<Vec<ScoreboardEntry>> {
    ScoreboardRepository::new(pool).scoreboard().await
}
