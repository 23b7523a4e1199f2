use sqlx::PgPool;
use storage::{dto::stats::StatsPayload, error::Result, repository::stats::StatsRepository};

pub async fn collect_stats(pool: &PgPool) -> Result<StatsPayload> {
    StatsRepository::new(pool).collect().await
}
