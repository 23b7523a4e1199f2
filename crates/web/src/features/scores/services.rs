use sqlx::PgPool;
use storage::{
    dto::common::PaginationParams,
    dto::participant::ParticipantWithStats,
    dto::score::{AcceptedScore, RecentScoreEntry, SubmitScoreRequest},
    error::Result,
    models::{AuthenticatedJudge, Category},
    repository::score::{ReferenceCheck, ScoreRepository},
};

/// Resolve the submission's references ahead of any write so every
/// precondition failure can be reported in one response.
pub async fn verify_references(
    pool: &PgPool,
    judge_id: i32,
    request: &SubmitScoreRequest,
) -> Result<ReferenceCheck> {
    ScoreRepository::new(pool)
        .verify_references(judge_id, request.participant_id, request.category_id)
        .await
}

/// Run the transactional upsert + audit + stats re-read.
pub async fn submit_score(
    pool: &PgPool,
    judge: &AuthenticatedJudge,
    request: &SubmitScoreRequest,
    participant_name: &str,
    category: &Category,
) -> Result<(AcceptedScore, ParticipantWithStats)> {
    ScoreRepository::new(pool)
        .submit(judge, request, participant_name, category)
        .await
}

pub async fn recent_scores(
    pool: &PgPool,
    pagination: &PaginationParams,
) -> Result<(Vec<RecentScoreEntry>, i64)> {
    ScoreRepository::new(pool).recent(pagination).await
}
