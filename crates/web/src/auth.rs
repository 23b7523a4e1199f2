use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use storage::{
    Database, error::StorageError, models::AuthenticatedJudge, repository::token::TokenRepository,
};

use crate::error::WebError;

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.trim().to_string())
}

/// Authenticated request context. Extraction validates the bearer token
/// against the token store and re-fetches the owning judge, so a judge
/// deactivated after login is rejected immediately.
#[derive(Debug, Clone)]
pub struct AuthJudge {
    pub judge: AuthenticatedJudge,
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthJudge
where
    S: Send + Sync,
    Database: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| WebError::Unauthorized("Unauthorized".to_string()))?;

        let db = Database::from_ref(state);
        let judge = TokenRepository::new(db.pool())
            .validate(&token)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => WebError::Unauthorized("Invalid token".to_string()),
                other => WebError::Storage(other),
            })?;

        Ok(AuthJudge { judge, token })
    }
}

/// Like [`AuthJudge`] but additionally requires the admin role.
#[derive(Debug, Clone)]
pub struct AdminJudge {
    pub judge: AuthenticatedJudge,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminJudge
where
    S: Send + Sync,
    Database: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthJudge::from_request_parts(parts, state).await?;

        if !auth.judge.is_admin() {
            return Err(WebError::Forbidden("Forbidden".to_string()));
        }

        Ok(AdminJudge { judge: auth.judge })
    }
}

impl AuthJudge {
    /// Self-or-admin ownership rule: a judge may always act on their own
    /// resource, anyone else's requires the admin role.
    pub fn can_access_judge(&self, judge_id: i32) -> bool {
        self.judge.id == judge_id || self.judge.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token_from_bearer_header() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let headers = headers_with_auth("bearer abc123");
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
        assert_eq!(extract_bearer_token(&headers_with_auth("abc123")), None);
        assert_eq!(extract_bearer_token(&headers_with_auth("Basic abc123")), None);
        assert_eq!(extract_bearer_token(&headers_with_auth("Bearer ")), None);
    }

    #[test]
    fn ownership_rule_allows_self_and_admin() {
        let judge = AuthJudge {
            judge: AuthenticatedJudge {
                id: 7,
                username: "j7".to_string(),
                display_name: "Judge Seven".to_string(),
                role: "judge".to_string(),
            },
            token: "t".to_string(),
        };
        assert!(judge.can_access_judge(7));
        assert!(!judge.can_access_judge(8));

        let admin = AuthJudge {
            judge: AuthenticatedJudge {
                id: 1,
                username: "root".to_string(),
                display_name: "Admin".to_string(),
                role: "admin".to_string(),
            },
            token: "t".to_string(),
        };
        assert!(admin.can_access_judge(7));
    }
}
