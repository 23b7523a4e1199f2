use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::PaginationMeta,
    dto::judge::{CreateJudgeRequest, CreateJudgeResponse, JudgeListResponse},
    dto::score::{JudgeScoresFilter, JudgeScoresResponse},
};
use validator::Validate;

use crate::auth::{AdminJudge, AuthJudge};
use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/judges",
    request_body = CreateJudgeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Judge created", body = CreateJudgeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Username or email already exists")
    ),
    tag = "judges"
)]
pub async fn create_judge(
    State(db): State<Database>,
    admin: AdminJudge,
    Json(req): Json<CreateJudgeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let judge = services::create_judge(db.pool(), &req, admin.judge.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateJudgeResponse {
            success: true,
            message: "Judge added successfully".to_string(),
            judge,
        }),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/judges",
    responses(
        (status = 200, description = "Active judges with scoring activity", body = JudgeListResponse)
    ),
    tag = "judges"
)]
pub async fn list_judges(State(db): State<Database>) -> Result<Response, WebError> {
    let judges = services::list_judges(db.pool()).await?;

    Ok(Json(JudgeListResponse {
        success: true,
        judges,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/judges/{id}/scores",
    params(
        ("id" = i32, Path, description = "Judge ID"),
        JudgeScoresFilter
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Judge score history with summary", body = JudgeScoresResponse),
        (status = 400, description = "Invalid pagination"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Viewing another judge's scores requires admin")
    ),
    tag = "judges"
)]
pub async fn get_judge_scores(
    State(db): State<Database>,
    auth: AuthJudge,
    Path(judge_id): Path<i32>,
    Query(filter): Query<JudgeScoresFilter>,
) -> Result<Response, WebError> {
    filter.pagination().validate().map_err(WebError::BadRequest)?;

    if !auth.can_access_judge(judge_id) {
        return Err(WebError::Forbidden("Permission denied".to_string()));
    }

    let (scores, total, summary) = services::judge_scores(db.pool(), judge_id, &filter).await?;

    Ok(Json(JudgeScoresResponse {
        success: true,
        pagination: PaginationMeta::new(filter.page, filter.limit, total),
        summary,
        scores,
    })
    .into_response())
}
