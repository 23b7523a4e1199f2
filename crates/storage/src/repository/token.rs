use chrono::{DateTime, Duration, Utc};
use sqlx::{PgConnection, PgPool};

use crate::error::{Result, StorageError};
use crate::models::AuthenticatedJudge;
use crate::services::tokens::generate_token;

/// Access tokens live for one hour; refresh tokens get their own, longer
/// window and are consumed on use.
fn access_ttl() -> Duration {
    Duration::hours(1)
}

fn refresh_ttl() -> Duration {
    Duration::days(7)
}

/// A freshly generated access/refresh pair, already persisted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct TokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TokenRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Generate and persist a new token pair for a judge.
    pub async fn issue(&self, judge_id: i32) -> Result<IssuedToken> {
        let mut conn = self.pool.acquire().await?;
        insert_pair(&mut conn, judge_id).await
    }

    /// Resolve an access token to the owning judge.
    ///
    /// The judge record is re-fetched on every validation rather than
    /// trusted from the token row, so deactivating a judge takes effect on
    /// their very next request instead of at token expiry.
    pub async fn validate(&self, access_token: &str) -> Result<AuthenticatedJudge> {
        let row: Option<(i32, DateTime<Utc>)> = sqlx::query_as(
            "SELECT judge_id, expires_at FROM tokens WHERE token = $1",
        )
        .bind(access_token)
        .fetch_optional(self.pool)
        .await?;

        let (judge_id, expires_at) = row.ok_or(StorageError::NotFound)?;
        if Utc::now() > expires_at {
            return Err(StorageError::NotFound);
        }

        fetch_active_judge(self.pool, judge_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Rotate a refresh token: consume the old row and issue a new pair in
    /// one transaction. A consumed or expired refresh token fails lookup.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(IssuedToken, AuthenticatedJudge)> {
        let mut tx = self.pool.begin().await?;

        // DELETE ... RETURNING makes the token single-use even under
        // concurrent refresh attempts: only one transaction gets the row.
        let judge_id: Option<i32> = sqlx::query_scalar(
            r#"
            DELETE FROM tokens
            WHERE refresh_token = $1 AND refresh_expires_at > NOW()
            RETURNING judge_id
            "#,
        )
        .bind(refresh_token)
        .fetch_optional(&mut *tx)
        .await?;

        let judge_id = judge_id.ok_or(StorageError::NotFound)?;

        let judge = fetch_active_judge(&mut *tx, judge_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let issued = insert_pair(&mut tx, judge_id).await?;

        tx.commit().await?;

        Ok((issued, judge))
    }

    /// Server-side logout: drop the token row so the pair is dead
    /// immediately, not just discarded client-side.
    pub async fn revoke(&self, access_token: &str) -> Result<()> {
        sqlx::query("DELETE FROM tokens WHERE token = $1")
            .bind(access_token)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

async fn insert_pair(conn: &mut PgConnection, judge_id: i32) -> Result<IssuedToken> {
    let token = generate_token();
    let refresh_token = generate_token();
    let now = Utc::now();
    let expires_at = now + access_ttl();
    let refresh_expires_at = now + refresh_ttl();

    sqlx::query(
        r#"
        INSERT INTO tokens (judge_id, token, refresh_token, expires_at, refresh_expires_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(judge_id)
    .bind(&token)
    .bind(&refresh_token)
    .bind(expires_at)
    .bind(refresh_expires_at)
    .execute(conn)
    .await?;

    Ok(IssuedToken {
        token,
        refresh_token,
        expires_at,
    })
}

async fn fetch_active_judge<'e, E>(executor: E, judge_id: i32) -> Result<Option<AuthenticatedJudge>>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let judge = sqlx::query_as::<_, AuthenticatedJudge>(
        r#"
        SELECT j.id, j.username, j.display_name, r.name AS role
        FROM judges j
        JOIN roles r ON j.role_id = r.id
        WHERE j.id = $1 AND j.is_active = TRUE
        "#,
    )
    .bind(judge_id)
    .fetch_optional(executor)
    .await?;

    Ok(judge)
}
