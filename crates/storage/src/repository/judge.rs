use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{FromRow, PgPool, QueryBuilder};

use crate::dto::auth::{JudgeActivitySummary, Profile};
use crate::dto::judge::{CreateJudgeRequest, JudgeResponse, JudgeStats, JudgeWithStats};
use crate::error::{Result, StorageError};
use crate::models::{AuditAction, AuditEntry};
use crate::repository::{audit, decimal_to_f64};

/// Columns needed to check a login attempt.
#[derive(FromRow)]
pub struct LoginCandidate {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(FromRow)]
struct JudgeStatsRow {
    id: i32,
    username: String,
    display_name: String,
    email: String,
    role: String,
    is_active: bool,
    scores_given: i64,
    participants_scored: i64,
    average_score: Decimal,
    last_activity: Option<DateTime<Utc>>,
}

pub struct JudgeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> JudgeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an active judge by email for credential verification.
    /// Inactive accounts are invisible here, so they can never log in.
    pub async fn find_for_login(&self, email: &str) -> Result<Option<LoginCandidate>> {
        let candidate = sqlx::query_as::<_, LoginCandidate>(
            r#"
            SELECT j.id, j.username, j.display_name, j.password_hash, r.name AS role
            FROM judges j
            JOIN roles r ON j.role_id = r.id
            WHERE j.email = $1 AND j.is_active = TRUE
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(candidate)
    }

    pub async fn touch_last_login(&self, judge_id: i32) -> Result<()> {
        sqlx::query("UPDATE judges SET last_login = NOW() WHERE id = $1")
            .bind(judge_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Scoring activity echoed back with the user on login.
    pub async fn activity_summary(&self, judge_id: i32) -> Result<JudgeActivitySummary> {
        let row: (i64, i64, Option<DateTime<Utc>>) = sqlx::query_as(
            r#"
            SELECT
                COUNT(DISTINCT participant_id),
                COUNT(*),
                MAX(created_at)
            FROM scores
            WHERE judge_id = $1
            "#,
        )
        .bind(judge_id)
        .fetch_one(self.pool)
        .await?;

        Ok(JudgeActivitySummary {
            participants_scored: row.0,
            total_scores: row.1,
            last_score_date: row.2,
        })
    }

    /// Create a judge account: duplicate check, insert, audit row, and
    /// re-fetch of the created record, all in one transaction.
    pub async fn create(
        &self,
        request: &CreateJudgeRequest,
        password_hash: &str,
        actor_id: i32,
    ) -> Result<JudgeResponse> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i32> =
            sqlx::query_scalar("SELECT id FROM judges WHERE username = $1 OR email = $2")
                .bind(&request.username)
                .bind(&request.email)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_some() {
            return Err(StorageError::ConstraintViolation(
                "Username or email already exists".to_string(),
            ));
        }

        let role_exists: Option<i32> = sqlx::query_scalar("SELECT id FROM roles WHERE id = $1")
            .bind(request.role_id)
            .fetch_optional(&mut *tx)
            .await?;

        if role_exists.is_none() {
            return Err(StorageError::InvalidReference("Invalid role".to_string()));
        }

        let new_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO judges (username, display_name, email, password_hash, role_id, is_active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING id
            "#,
        )
        .bind(&request.username)
        .bind(&request.display_name)
        .bind(&request.email)
        .bind(password_hash)
        .bind(request.role_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // A concurrent insert can slip past the pre-check; the unique
            // constraint still reports it as the same conflict.
            let e = StorageError::from(e);
            if e.is_unique_violation() {
                StorageError::ConstraintViolation("Username or email already exists".to_string())
            } else {
                e
            }
        })?;

        audit::record(
            &mut tx,
            &AuditEntry {
                table_name: "judges",
                record_id: new_id,
                action: AuditAction::Insert,
                actor_id: Some(actor_id),
                changes: json!({
                    "username": request.username,
                    "display_name": request.display_name,
                    "email": request.email,
                    "role_id": request.role_id,
                }),
            },
        )
        .await?;

        let judge = sqlx::query_as::<_, JudgeResponse>(
            r#"
            SELECT j.id, j.username, j.display_name, j.email, r.name AS role, j.created_at
            FROM judges j
            JOIN roles r ON j.role_id = r.id
            WHERE j.id = $1
            "#,
        )
        .bind(new_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(judge)
    }

    /// Active judges with their scoring activity, for the public listing.
    pub async fn list_with_stats(&self) -> Result<Vec<JudgeWithStats>> {
        let rows = sqlx::query_as::<_, JudgeStatsRow>(
            r#"
            SELECT
                j.id,
                j.username,
                j.display_name,
                j.email,
                j.is_active,
                r.name AS role,
                COUNT(s.id) AS scores_given,
                COUNT(DISTINCT s.participant_id) AS participants_scored,
                ROUND(COALESCE(AVG(s.points), 0), 2) AS average_score,
                MAX(s.created_at) AS last_activity
            FROM judges j
            LEFT JOIN roles r ON j.role_id = r.id
            LEFT JOIN scores s ON j.id = s.judge_id
            WHERE j.is_active = TRUE
            GROUP BY j.id, j.username, j.display_name, j.email, j.is_active, r.name
            ORDER BY j.display_name ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let judges = rows
            .into_iter()
            .map(|row| JudgeWithStats {
                id: row.id,
                username: row.username,
                display_name: row.display_name,
                email: row.email,
                role: row.role,
                is_active: row.is_active,
                stats: JudgeStats {
                    scores_given: row.scores_given,
                    participants_scored: row.participants_scored,
                    average_score: decimal_to_f64(row.average_score),
                    last_activity: row.last_activity,
                },
            })
            .collect();

        Ok(judges)
    }

    pub async fn profile(&self, judge_id: i32) -> Result<Profile> {
        let profile = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                j.id,
                j.username,
                j.display_name,
                j.email,
                r.name AS role,
                j.created_at,
                j.last_login,
                (SELECT COUNT(*) FROM scores WHERE judge_id = j.id) AS total_scores
            FROM judges j
            JOIN roles r ON j.role_id = r.id
            WHERE j.id = $1 AND j.is_active = TRUE
            "#,
        )
        .bind(judge_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(Profile {
            id: profile.id,
            username: profile.username,
            display_name: profile.display_name,
            email: profile.email,
            role: profile.role,
            created_at: profile.created_at,
            last_login: profile.last_login,
            total_scores: profile.total_scores,
        })
    }

    pub async fn find_password_hash(&self, judge_id: i32) -> Result<String> {
        sqlx::query_scalar("SELECT password_hash FROM judges WHERE id = $1")
            .bind(judge_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Apply a partial profile update. The email uniqueness check excludes
    /// the judge's own row so resubmitting an unchanged email is fine.
    pub async fn update_profile(
        &self,
        judge_id: i32,
        display_name: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Profile> {
        if let Some(email) = email {
            let taken: Option<i32> =
                sqlx::query_scalar("SELECT id FROM judges WHERE email = $1 AND id != $2")
                    .bind(email)
                    .bind(judge_id)
                    .fetch_optional(self.pool)
                    .await?;
            if taken.is_some() {
                return Err(StorageError::ConstraintViolation(
                    "Email already in use".to_string(),
                ));
            }
        }

        let mut query = QueryBuilder::new("UPDATE judges SET ");
        let mut fields = query.separated(", ");
        if let Some(display_name) = display_name {
            fields.push("display_name = ").push_bind_unseparated(display_name);
        }
        if let Some(email) = email {
            fields.push("email = ").push_bind_unseparated(email);
        }
        if let Some(password_hash) = password_hash {
            fields.push("password_hash = ").push_bind_unseparated(password_hash);
        }
        query.push(" WHERE id = ").push_bind(judge_id);
        query.build().execute(self.pool).await.map_err(|e| {
            let e = StorageError::from(e);
            if e.is_unique_violation() {
                StorageError::ConstraintViolation("Email already in use".to_string())
            } else {
                e
            }
        })?;

        self.profile(judge_id).await
    }
}

#[derive(FromRow)]
struct ProfileRow {
    id: i32,
    username: String,
    display_name: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
    total_scores: i64,
}
