use sqlx::PgPool;
use storage::{
    dto::judge::{CreateJudgeRequest, JudgeResponse, JudgeWithStats},
    dto::score::{JudgeScoreEntry, JudgeScoreSummary, JudgeScoresFilter},
    error::Result,
    repository::{judge::JudgeRepository, score::ScoreRepository},
    services::passwords,
};

/// Create a judge account on behalf of an administrator. Hashing happens
/// here so the repository transaction never sees the plaintext password.
pub async fn create_judge(
    pool: &PgPool,
    request: &CreateJudgeRequest,
    actor_id: i32,
) -> Result<JudgeResponse> {
    let password_hash = passwords::hash_password(&request.password)?;
    JudgeRepository::new(pool)
        .create(request, &password_hash, actor_id)
        .await
}

pub async fn list_judges(pool: &PgPool) -> Result<Vec<JudgeWithStats>> {
    JudgeRepository::new(pool).list_with_stats().await
}

pub async fn judge_scores(
    pool: &PgPool,
    judge_id: i32,
    filter: &JudgeScoresFilter,
) -> Result<(Vec<JudgeScoreEntry>, i64, JudgeScoreSummary)> {
    ScoreRepository::new(pool).for_judge(judge_id, filter).await
}
