use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{FromRow, PgPool, QueryBuilder};

use crate::dto::common::PaginationParams;
use crate::dto::participant::ParticipantWithStats;
use crate::dto::score::{
    AcceptedScore, CategoryRef, JudgeRef, JudgeScoreEntry, JudgeScoreSummary, JudgeScoresFilter,
    ParticipantRef, RecentScoreEntry, ScoreDetail, SubmitScoreRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{AuditAction, AuditEntry, AuthenticatedJudge, Category};
use crate::repository::category::CategoryRepository;
use crate::repository::participant::ParticipantRepository;
use crate::repository::{audit, decimal_to_f64, participant};

/// Outcome of checking a submission's references against live rows. All
/// failures are collected by the caller into one field-keyed 400 response.
#[derive(Debug)]
pub struct ReferenceCheck {
    pub judge_active: bool,
    pub participant_name: Option<String>,
    pub category: Option<Category>,
}

#[derive(FromRow)]
struct RecentScoreRow {
    id: i32,
    points: i32,
    comments: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    judge_name: String,
    judge_username: String,
    participant_name: String,
    registration_number: Option<String>,
    category_name: String,
    category_weight: i32,
}

#[derive(FromRow)]
struct JudgeScoreRow {
    id: i32,
    points: i32,
    comments: Option<String>,
    created_at: DateTime<Utc>,
    participant_name: String,
    category_name: Option<String>,
    participant_average: Option<Decimal>,
}

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the submission's judge, participant, and category before any
    /// write happens. Names are returned for the audit snapshot.
    pub async fn verify_references(
        &self,
        judge_id: i32,
        participant_id: i32,
        category_id: i32,
    ) -> Result<ReferenceCheck> {
        let judge_active: Option<i32> =
            sqlx::query_scalar("SELECT id FROM judges WHERE id = $1 AND is_active = TRUE")
                .bind(judge_id)
                .fetch_optional(self.pool)
                .await?;

        let participant_name = ParticipantRepository::new(self.pool)
            .exists_active(participant_id)
            .await?;

        let category = CategoryRepository::new(self.pool)
            .find_active(category_id)
            .await?;

        Ok(ReferenceCheck {
            judge_active: judge_active.is_some(),
            participant_name,
            category,
        })
    }

    /// Insert or overwrite the score for this (judge, participant, category)
    /// triple, write the audit row, and re-read the participant's aggregates
    /// before committing. Any failure rolls back all three.
    pub async fn submit(
        &self,
        judge: &AuthenticatedJudge,
        request: &SubmitScoreRequest,
        participant_name: &str,
        category: &Category,
    ) -> Result<(AcceptedScore, ParticipantWithStats)> {
        let mut tx = self.pool.begin().await?;

        // ON CONFLICT on the triple's unique constraint keeps this a single
        // atomic statement: concurrent submissions for the same triple can
        // never produce a duplicate row, the last commit wins. `xmax = 0`
        // reports which branch was taken.
        let (score_id, inserted): (i32, bool) = sqlx::query_as(
            r#"
            INSERT INTO scores (judge_id, participant_id, category_id, points, comments)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (judge_id, participant_id, category_id) DO UPDATE SET
                points = EXCLUDED.points,
                comments = EXCLUDED.comments,
                updated_at = NOW()
            RETURNING id, (xmax = 0) AS inserted
            "#,
        )
        .bind(judge.id)
        .bind(request.participant_id)
        .bind(request.category_id)
        .bind(request.points)
        .bind(&request.comments)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // References were verified before this write; a foreign key
            // failure here means a row was removed in between.
            let e = StorageError::from(e);
            if e.is_foreign_key_violation() {
                StorageError::InvalidReference(
                    "Unknown judge, participant, or category".to_string(),
                )
            } else {
                e
            }
        })?;

        let action = if inserted {
            AuditAction::Insert
        } else {
            AuditAction::Update
        };

        audit::record(
            &mut tx,
            &AuditEntry {
                table_name: "scores",
                record_id: score_id,
                action,
                actor_id: Some(judge.id),
                changes: json!({
                    "judge_id": judge.id,
                    "participant_id": request.participant_id,
                    "participant_name": participant_name,
                    "category_id": request.category_id,
                    "category_name": category.name,
                    "points": request.points,
                    "comments": request.comments,
                }),
            },
        )
        .await?;

        let participant = participant::with_stats(&mut *tx, request.participant_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        tx.commit().await?;

        let score = AcceptedScore {
            points: request.points,
            weighted_points: request.points * category.weight,
            category: category.name.clone(),
            comments: request.comments.clone(),
        };

        Ok((score, participant))
    }

    /// Most recent scores across all active judges, participants, and
    /// categories, newest first.
    pub async fn recent(
        &self,
        pagination: &PaginationParams,
    ) -> Result<(Vec<RecentScoreEntry>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scores")
            .fetch_one(self.pool)
            .await?;

        let rows = sqlx::query_as::<_, RecentScoreRow>(
            r#"
            SELECT
                s.id,
                s.points,
                s.comments,
                s.created_at,
                s.updated_at,
                j.display_name AS judge_name,
                j.username AS judge_username,
                p.name AS participant_name,
                p.registration_number,
                c.name AS category_name,
                c.weight AS category_weight
            FROM scores s
            INNER JOIN judges j ON s.judge_id = j.id
            INNER JOIN participants p ON s.participant_id = p.id
            INNER JOIN categories c ON s.category_id = c.id
            WHERE j.is_active = TRUE
              AND p.is_active = TRUE
              AND c.is_active = TRUE
            ORDER BY s.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| RecentScoreEntry {
                id: row.id,
                judge: JudgeRef {
                    name: row.judge_name,
                    username: row.judge_username,
                },
                participant: ParticipantRef {
                    name: row.participant_name,
                    registration: row.registration_number,
                },
                category: CategoryRef {
                    name: row.category_name,
                    weight: row.category_weight,
                },
                score: ScoreDetail {
                    points: row.points,
                    comments: row.comments,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
            })
            .collect();

        Ok((entries, total))
    }

    /// One judge's scoring history with an overall summary, optionally
    /// bounded by a date range.
    pub async fn for_judge(
        &self,
        judge_id: i32,
        filter: &JudgeScoresFilter,
    ) -> Result<(Vec<JudgeScoreEntry>, i64, JudgeScoreSummary)> {
        let mut count_query =
            QueryBuilder::new("SELECT COUNT(*) FROM scores WHERE judge_id = ");
        count_query.push_bind(judge_id);
        push_date_range(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(
            r#"
            SELECT
                s.id,
                s.points,
                s.comments,
                s.created_at,
                p.name AS participant_name,
                c.name AS category_name,
                ROUND((SELECT AVG(points) FROM scores s2
                       WHERE s2.participant_id = s.participant_id), 2) AS participant_average
            FROM scores s
            JOIN participants p ON s.participant_id = p.id
            LEFT JOIN categories c ON s.category_id = c.id
            WHERE s.judge_id =
            "#,
        );
        query.push_bind(judge_id);
        push_prefixed_date_range(&mut query, filter);
        query.push(" ORDER BY s.created_at DESC LIMIT ");
        query.push_bind(filter.pagination().limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(filter.pagination().offset() as i64);

        let rows: Vec<JudgeScoreRow> = query.build_query_as().fetch_all(self.pool).await?;

        let entries = rows
            .into_iter()
            .map(|row| JudgeScoreEntry {
                id: row.id,
                points: row.points,
                comments: row.comments,
                created_at: row.created_at,
                participant_name: row.participant_name,
                category_name: row.category_name,
                participant_average: row
                    .participant_average
                    .map(decimal_to_f64)
                    .unwrap_or(0.0),
            })
            .collect();

        let summary_row: (i64, i64, Option<Decimal>, Option<i32>, Option<i32>) = sqlx::query_as(
            r#"
            SELECT
                COUNT(DISTINCT participant_id),
                COUNT(*),
                ROUND(AVG(points), 2),
                MIN(points),
                MAX(points)
            FROM scores
            WHERE judge_id = $1
            "#,
        )
        .bind(judge_id)
        .fetch_one(self.pool)
        .await?;

        let summary = JudgeScoreSummary {
            participants_scored: summary_row.0,
            total_scores: summary_row.1,
            average_score: summary_row.2.map(decimal_to_f64).unwrap_or(0.0),
            min_score: summary_row.3,
            max_score: summary_row.4,
        };

        Ok((entries, total, summary))
    }
}

fn push_date_range(query: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &JudgeScoresFilter) {
    if let Some(date_from) = filter.date_from {
        query.push(" AND created_at >= ");
        query.push_bind(date_from);
    }
    if let Some(date_to) = filter.date_to {
        query.push(" AND created_at <= ");
        query.push_bind(date_to);
    }
}

fn push_prefixed_date_range(
    query: &mut QueryBuilder<'_, sqlx::Postgres>,
    filter: &JudgeScoresFilter,
) {
    if let Some(date_from) = filter.date_from {
        query.push(" AND s.created_at >= ");
        query.push_bind(date_from);
    }
    if let Some(date_to) = filter.date_to {
        query.push(" AND s.created_at <= ");
        query.push_bind(date_to);
    }
}
