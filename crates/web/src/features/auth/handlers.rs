use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::{
    Database,
    dto::auth::{
        LoginRequest, ProfileResponse, RefreshRequest, TokenResponse, UpdateProfileRequest,
        ValidateResponse,
    },
};
use validator::Validate;

use crate::auth::AuthJudge;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated successfully", body = TokenResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials or inactive account")
    ),
    tag = "auth"
)]
pub async fn login(
    State(db): State<Database>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(WebError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let response = services::login(db.pool(), &req.email, &req.password).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair issued", body = TokenResponse),
        (status = 400, description = "Missing refresh token"),
        (status = 401, description = "Invalid, expired, or already consumed refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(db): State<Database>,
    Json(req): Json<RefreshRequest>,
) -> Result<Response, WebError> {
    if req.refresh_token.is_empty() {
        return Err(WebError::BadRequest("Refresh token is required".to_string()));
    }

    let response = services::refresh(db.pool(), &req.refresh_token).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/validate",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = ValidateResponse),
        (status = 401, description = "Missing, invalid, or expired token")
    ),
    tag = "auth"
)]
pub async fn validate_token(_auth: AuthJudge) -> Result<Response, WebError> {
    Ok(Json(ValidateResponse {
        success: true,
        valid: true,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token revoked"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn logout(State(db): State<Database>, auth: AuthJudge) -> Result<Response, WebError> {
    services::logout(db.pool(), &auth.token).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Logged out successfully"
    }))
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile with scoring totals", body = ProfileResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn get_profile(
    State(db): State<Database>,
    auth: AuthJudge,
) -> Result<Response, WebError> {
    let profile = services::profile(db.pool(), auth.judge.id).await?;

    Ok(Json(ProfileResponse {
        success: true,
        profile,
    })
    .into_response())
}

#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = UpdateProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Validation error or wrong current password"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already in use")
    ),
    tag = "auth"
)]
pub async fn update_profile(
    State(db): State<Database>,
    auth: AuthJudge,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let profile = services::update_profile(db.pool(), auth.judge.id, &req).await?;

    Ok(Json(ProfileResponse {
        success: true,
        profile,
    })
    .into_response())
}
