use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{Database, dto::scoreboard::ScoreboardResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/scoreboard",
    responses(
        (status = 200, description = "Ranked standings with per-category breakdowns", body = ScoreboardResponse)
    ),
    tag = "scoreboard"
)]
pub async fn get_scoreboard(State(db): State<Database>) -> Result<Response, WebError> {
    let scoreboard = services::scoreboard(db.pool()).await?;

    Ok(Json(ScoreboardResponse {
        success: true,
        count: scoreboard.len(),
        timestamp: Utc::now(),
        scoreboard,
    })
    .into_response())
}
