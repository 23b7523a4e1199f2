use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{Database, dto::stats::StatsResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Platform-wide scoring statistics", body = StatsResponse)
    ),
    tag = "stats"
)]
pub async fn get_stats(State(db): State<Database>) -> Result<Response, WebError> {
    let stats = services::collect_stats(db.pool()).await?;

    Ok(Json(StatsResponse {
        success: true,
        timestamp: Utc::now(),
        stats,
    })
    .into_response())
}
