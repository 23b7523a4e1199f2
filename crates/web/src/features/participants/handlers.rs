use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{Database, dto::participant::ParticipantListResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/participants",
    responses(
        (status = 200, description = "Active participants with statistics", body = ParticipantListResponse)
    ),
    tag = "participants"
)]
pub async fn list_participants(State(db): State<Database>) -> Result<Response, WebError> {
    let participants = services::list_participants(db.pool()).await?;

    Ok(Json(ParticipantListResponse {
        success: true,
        count: participants.len(),
        timestamp: Utc::now(),
        participants,
    })
    .into_response())
}
