use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::dto::participant::{ParticipantStats, ParticipantWithStats};
use crate::error::Result;
use crate::repository::decimal_to_f64;

#[derive(FromRow)]
struct ParticipantStatsRow {
    id: i32,
    name: String,
    email: Option<String>,
    registration_number: Option<String>,
    total_scores: i64,
    average_score: Decimal,
    judges_count: i64,
    categories_count: i64,
    min_score: Option<i32>,
    max_score: Option<i32>,
    last_scored: Option<DateTime<Utc>>,
}

impl From<ParticipantStatsRow> for ParticipantWithStats {
    fn from(row: ParticipantStatsRow) -> Self {
        ParticipantWithStats {
            id: row.id,
            name: row.name,
            email: row.email,
            registration: row.registration_number,
            stats: ParticipantStats {
                total_scores: row.total_scores,
                average_score: decimal_to_f64(row.average_score),
                judges_count: row.judges_count,
                categories_count: row.categories_count,
                min_score: row.min_score,
                max_score: row.max_score,
                last_scored: row.last_scored,
            },
        }
    }
}

const STATS_SELECT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.email,
        p.registration_number,
        COUNT(s.id) AS total_scores,
        ROUND(COALESCE(AVG(s.points), 0), 2) AS average_score,
        COUNT(DISTINCT s.judge_id) AS judges_count,
        COUNT(DISTINCT s.category_id) AS categories_count,
        MIN(s.points) AS min_score,
        MAX(s.points) AS max_score,
        MAX(s.created_at) AS last_scored
    FROM participants p
    LEFT JOIN scores s ON p.id = s.participant_id
"#;

/// Aggregate one participant's statistics from the scores table. Generic
/// over the executor so the score submission transaction can re-read stats
/// before committing.
pub(crate) async fn with_stats<'e, E>(
    executor: E,
    participant_id: i32,
) -> Result<Option<ParticipantWithStats>>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let sql = format!(
        "{STATS_SELECT} WHERE p.id = $1 AND p.is_active = TRUE \
         GROUP BY p.id, p.name, p.email, p.registration_number"
    );

    let row = sqlx::query_as::<_, ParticipantStatsRow>(&sql)
        .bind(participant_id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(ParticipantWithStats::from))
}

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists_active(&self, participant_id: i32) -> Result<Option<String>> {
        let name: Option<String> =
            sqlx::query_scalar("SELECT name FROM participants WHERE id = $1 AND is_active = TRUE")
                .bind(participant_id)
                .fetch_optional(self.pool)
                .await?;
        Ok(name)
    }

    /// Active participants with their aggregates, best average first.
    pub async fn list_with_stats(&self) -> Result<Vec<ParticipantWithStats>> {
        let sql = format!(
            "{STATS_SELECT} WHERE p.is_active = TRUE \
             GROUP BY p.id, p.name, p.email, p.registration_number \
             ORDER BY average_score DESC, p.name ASC"
        );

        let rows = sqlx::query_as::<_, ParticipantStatsRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(ParticipantWithStats::from).collect())
    }
}
