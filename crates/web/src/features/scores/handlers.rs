use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::common::{PaginationMeta, PaginationParams},
    dto::score::{RecentScoresResponse, SubmitScoreRequest, SubmitScoreResponse},
};
use validator::Validate;

use crate::auth::AuthJudge;
use crate::error::{WebError, validation_map};

use super::services;

#[utoipa::path(
    post,
    path = "/api/scores",
    request_body = SubmitScoreRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Score accepted, with fresh participant statistics", body = SubmitScoreResponse),
        (status = 400, description = "Field validation errors"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to submit score")
    ),
    tag = "scores"
)]
pub async fn submit_score(
    State(db): State<Database>,
    auth: AuthJudge,
    Json(req): Json<SubmitScoreRequest>,
) -> Result<Response, WebError> {
    // Collect every violation before responding; nothing is written until
    // all preconditions hold.
    let mut errors = match req.validate() {
        Ok(()) => Default::default(),
        Err(e) => validation_map(&e),
    };

    let check = services::verify_references(db.pool(), auth.judge.id, &req).await?;

    if !check.judge_active {
        errors.insert(
            "judge_id".to_string(),
            "Invalid or inactive judge".to_string(),
        );
    }
    if check.participant_name.is_none() {
        errors
            .entry("participant_id".to_string())
            .or_insert_with(|| "Invalid or inactive participant".to_string());
    }
    if check.category.is_none() {
        errors
            .entry("category_id".to_string())
            .or_insert_with(|| "Invalid category".to_string());
    }

    let (participant_name, category) = match (check.participant_name, check.category) {
        (Some(name), Some(category)) if errors.is_empty() => (name, category),
        _ => return Err(WebError::Validation(errors)),
    };

    let (score, participant) =
        services::submit_score(db.pool(), &auth.judge, &req, &participant_name, &category)
            .await
            .map_err(|e| {
                tracing::error!("Score submission failed: {e}");
                WebError::Internal("Failed to submit score".to_string())
            })?;

    Ok(Json(SubmitScoreResponse {
        success: true,
        message: "Score submitted successfully".to_string(),
        score,
        participant,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/scores/recent",
    params(PaginationParams),
    responses(
        (status = 200, description = "Most recent scores, newest first", body = RecentScoresResponse),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "scores"
)]
pub async fn get_recent_scores(
    State(db): State<Database>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (scores, total) = services::recent_scores(db.pool(), &pagination).await?;

    Ok(Json(RecentScoresResponse {
        success: true,
        timestamp: Utc::now(),
        pagination: PaginationMeta::new(pagination.page, pagination.limit, total),
        scores,
    })
    .into_response())
}
