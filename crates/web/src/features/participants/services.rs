use sqlx::PgPool;
use storage::{
    dto::participant::ParticipantWithStats, error::Result,
    repository::participant::ParticipantRepository,
};

/// Active participants with read-time aggregates, best average first.
pub async fn list_participants(pool: &PgPool) -> Result<Vec<ParticipantWithStats>> {
    ParticipantRepository::new(pool).list_with_stats().await
}
