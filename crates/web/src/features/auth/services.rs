use sqlx::PgPool;
use storage::{
    dto::auth::{AuthUser, Profile, TokenResponse, UpdateProfileRequest},
    error::StorageError,
    repository::{judge::JudgeRepository, token::TokenRepository},
    services::passwords,
};

use crate::error::{WebError, WebResult};

/// Check credentials against the active-judges table and issue a token
/// pair. The response echoes the judge's scoring activity, saving the
/// client a follow-up request.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> WebResult<TokenResponse> {
    let judges = JudgeRepository::new(pool);

    let candidate = judges
        .find_for_login(email)
        .await?
        .ok_or_else(|| WebError::Unauthorized("Invalid credentials".to_string()))?;

    if !passwords::verify_password(password, &candidate.password_hash)? {
        return Err(WebError::Unauthorized("Invalid credentials".to_string()));
    }

    let issued = TokenRepository::new(pool).issue(candidate.id).await?;
    judges.touch_last_login(candidate.id).await?;
    let stats = judges.activity_summary(candidate.id).await?;

    Ok(TokenResponse {
        success: true,
        token: issued.token,
        refresh_token: issued.refresh_token,
        expires_at: issued.expires_at,
        user: AuthUser {
            id: candidate.id,
            username: candidate.username,
            display_name: candidate.display_name,
            role: candidate.role,
            stats: Some(stats),
        },
    })
}

/// Rotate a refresh token. A consumed, expired, or unknown token is a 401,
/// not a 500: the client should re-authenticate.
pub async fn refresh(pool: &PgPool, refresh_token: &str) -> WebResult<TokenResponse> {
    let (issued, judge) = TokenRepository::new(pool)
        .refresh(refresh_token)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => {
                WebError::Unauthorized("Invalid or expired refresh token".to_string())
            }
            other => WebError::Storage(other),
        })?;

    Ok(TokenResponse {
        success: true,
        token: issued.token,
        refresh_token: issued.refresh_token,
        expires_at: issued.expires_at,
        user: AuthUser {
            id: judge.id,
            username: judge.username,
            display_name: judge.display_name,
            role: judge.role,
            stats: None,
        },
    })
}

pub async fn logout(pool: &PgPool, access_token: &str) -> WebResult<()> {
    TokenRepository::new(pool).revoke(access_token).await?;
    Ok(())
}

pub async fn profile(pool: &PgPool, judge_id: i32) -> WebResult<Profile> {
    Ok(JudgeRepository::new(pool).profile(judge_id).await?)
}

/// Apply a partial profile update. A password change requires the current
/// password and re-hashes before storage.
pub async fn update_profile(
    pool: &PgPool,
    judge_id: i32,
    request: &UpdateProfileRequest,
) -> WebResult<Profile> {
    if request.is_empty() {
        return Err(WebError::BadRequest("No valid fields to update".to_string()));
    }

    let judges = JudgeRepository::new(pool);

    let new_hash = match &request.new_password {
        Some(new_password) => {
            let current = request.current_password.as_deref().ok_or_else(|| {
                WebError::BadRequest("Current password is required".to_string())
            })?;

            let stored = judges.find_password_hash(judge_id).await?;
            if !passwords::verify_password(current, &stored)? {
                return Err(WebError::BadRequest(
                    "Current password is incorrect".to_string(),
                ));
            }

            Some(passwords::hash_password(new_password)?)
        }
        None => None,
    };

    let profile = judges
        .update_profile(
            judge_id,
            request.display_name.as_deref(),
            request.email.as_deref(),
            new_hash.as_deref(),
        )
        .await?;

    Ok(profile)
}
