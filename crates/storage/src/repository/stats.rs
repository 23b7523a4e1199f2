use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::dto::stats::{
    CategoryBreakdown, DailyActivity, JudgeActivity, OverviewStats, StatsPayload, TopParticipant,
};
use crate::error::Result;
use crate::repository::decimal_to_f64;

#[derive(FromRow)]
struct CategoryBreakdownRow {
    name: String,
    weight: i32,
    total_scores: i64,
    average_score: Decimal,
    min_score: Option<i32>,
    max_score: Option<i32>,
}

#[derive(FromRow)]
struct JudgeActivityRow {
    display_name: String,
    scores_given: i64,
    participants_scored: i64,
    average_score: Decimal,
    last_activity: Option<DateTime<Utc>>,
}

#[derive(FromRow)]
struct TopParticipantRow {
    name: String,
    total_scores: i64,
    average_score: Decimal,
    judges_scored: i64,
}

#[derive(FromRow)]
struct DailyActivityRow {
    date: NaiveDate,
    scores_count: i64,
    average_score: Decimal,
    unique_judges: i64,
    unique_participants: i64,
}

pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Assemble the full statistics payload. Every number is recomputed
    /// from the scores table on each call; no aggregate is cached.
    pub async fn collect(&self) -> Result<StatsPayload> {
        Ok(StatsPayload {
            overview: self.overview().await?,
            categories: self.category_breakdown().await?,
            judge_activity: self.judge_activity().await?,
            top_participants: self.top_participants().await?,
            recent_activity: self.recent_activity().await?,
        })
    }

    async fn overview(&self) -> Result<OverviewStats> {
        let overview = sqlx::query_as::<_, OverviewStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM participants WHERE is_active = TRUE) AS active_participants,
                (SELECT COUNT(*) FROM judges WHERE is_active = TRUE) AS active_judges,
                (SELECT COUNT(*) FROM categories WHERE is_active = TRUE) AS active_categories,
                (SELECT COUNT(*) FROM scores) AS total_scores
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok(overview)
    }

    async fn category_breakdown(&self) -> Result<Vec<CategoryBreakdown>> {
        let rows = sqlx::query_as::<_, CategoryBreakdownRow>(
            r#"
            SELECT
                c.name,
                c.weight,
                COUNT(s.id) AS total_scores,
                ROUND(COALESCE(AVG(s.points), 0), 2) AS average_score,
                MIN(s.points) AS min_score,
                MAX(s.points) AS max_score
            FROM categories c
            LEFT JOIN scores s ON c.id = s.category_id
            WHERE c.is_active = TRUE
            GROUP BY c.id
            ORDER BY c.weight DESC, c.name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryBreakdown {
                name: row.name,
                weight: row.weight,
                total_scores: row.total_scores,
                average_score: decimal_to_f64(row.average_score),
                min_score: row.min_score,
                max_score: row.max_score,
            })
            .collect())
    }

    async fn judge_activity(&self) -> Result<Vec<JudgeActivity>> {
        let rows = sqlx::query_as::<_, JudgeActivityRow>(
            r#"
            SELECT
                j.display_name,
                COUNT(s.id) AS scores_given,
                COUNT(DISTINCT s.participant_id) AS participants_scored,
                ROUND(COALESCE(AVG(s.points), 0), 2) AS average_score,
                MAX(s.created_at) AS last_activity
            FROM judges j
            LEFT JOIN scores s ON j.id = s.judge_id
            WHERE j.is_active = TRUE
            GROUP BY j.id
            ORDER BY scores_given DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| JudgeActivity {
                display_name: row.display_name,
                scores_given: row.scores_given,
                participants_scored: row.participants_scored,
                average_score: decimal_to_f64(row.average_score),
                last_activity: row.last_activity,
            })
            .collect())
    }

    async fn top_participants(&self) -> Result<Vec<TopParticipant>> {
        let rows = sqlx::query_as::<_, TopParticipantRow>(
            r#"
            SELECT
                p.name,
                COUNT(s.id) AS total_scores,
                ROUND(AVG(s.points), 2) AS average_score,
                COUNT(DISTINCT s.judge_id) AS judges_scored
            FROM participants p
            JOIN scores s ON p.id = s.participant_id
            WHERE p.is_active = TRUE
            GROUP BY p.id
            ORDER BY average_score DESC
            LIMIT 5
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TopParticipant {
                name: row.name,
                total_scores: row.total_scores,
                average_score: decimal_to_f64(row.average_score),
                judges_scored: row.judges_scored,
            })
            .collect())
    }

    async fn recent_activity(&self) -> Result<Vec<DailyActivity>> {
        let rows = sqlx::query_as::<_, DailyActivityRow>(
            r#"
            SELECT
                (s.created_at AT TIME ZONE 'UTC')::date AS date,
                COUNT(*) AS scores_count,
                ROUND(AVG(s.points), 2) AS average_score,
                COUNT(DISTINCT s.judge_id) AS unique_judges,
                COUNT(DISTINCT s.participant_id) AS unique_participants
            FROM scores s
            WHERE s.created_at >= NOW() - INTERVAL '7 days'
            GROUP BY (s.created_at AT TIME ZONE 'UTC')::date
            ORDER BY date DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| DailyActivity {
                date: row.date,
                scores_count: row.scores_count,
                average_score: decimal_to_f64(row.average_score),
                unique_judges: row.unique_judges,
                unique_participants: row.unique_participants,
            })
            .collect())
    }
}
